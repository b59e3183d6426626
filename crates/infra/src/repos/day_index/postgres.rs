use super::IDayIndexRepo;
use birthday_scheduler_domain::{BirthdayKey, DayIndexEntry, ID};
use chrono_tz::Tz;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

pub struct PostgresDayIndexRepo {
    pool: PgPool,
}

impl PostgresDayIndexRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DayIndexEntryRaw {
    birthday_key: String,
    user_uid: Uuid,
    first_name: String,
    last_name: String,
    timezone: String,
    birth_date: String,
    created_at: i64,
}

impl DayIndexEntryRaw {
    fn into_domain(self) -> anyhow::Result<DayIndexEntry> {
        Ok(DayIndexEntry {
            birthday_key: self.birthday_key.parse().map_err(anyhow::Error::new)?,
            user_id: self.user_uid.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            timezone: self
                .timezone
                .parse::<Tz>()
                .map_err(|e: String| anyhow::anyhow!(e))?,
            original_birth_date: self.birth_date.parse().map_err(anyhow::Error::new)?,
            created_at: self.created_at,
        })
    }
}

fn rows_into_domain(rows: Vec<DayIndexEntryRaw>) -> Vec<DayIndexEntry> {
    rows.into_iter()
        .filter_map(|raw| match raw.into_domain() {
            Ok(entry) => Some(entry),
            Err(e) => {
                error!("Skipping corrupt day index row. Err: {:?}", e);
                None
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl IDayIndexRepo for PostgresDayIndexRepo {
    async fn upsert(&self, entry: &DayIndexEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO day_index
            (birthday_key, user_uid, first_name, last_name, timezone, birth_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (birthday_key, user_uid) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                timezone = EXCLUDED.timezone,
                birth_date = EXCLUDED.birth_date
            "#,
        )
        .bind(entry.birthday_key.to_string())
        .bind(entry.user_id.inner_ref())
        .bind(&entry.first_name)
        .bind(&entry.last_name)
        .bind(entry.timezone.to_string())
        .bind(entry.original_birth_date.to_string())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &BirthdayKey, user_id: &ID) -> Option<DayIndexEntry> {
        let row = sqlx::query_as::<_, DayIndexEntryRaw>(
            r#"
            DELETE FROM day_index
            WHERE birthday_key = $1 AND user_uid = $2
            RETURNING *
            "#,
        )
        .bind(key.to_string())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Unable to delete day index entry ({}, {}). Err: {:?}",
                key, user_id, e
            );
            None
        })?;

        match row.into_domain() {
            Ok(entry) => Some(entry),
            Err(e) => {
                error!("Deleted day index row was corrupt. Err: {:?}", e);
                None
            }
        }
    }

    async fn find_by_key(&self, key: &BirthdayKey) -> Vec<DayIndexEntry> {
        let rows = sqlx::query_as::<_, DayIndexEntryRaw>(
            r#"
            SELECT * FROM day_index
            WHERE birthday_key = $1
            "#,
        )
        .bind(key.to_string())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to query day index for key {}. Err: {:?}", key, e);
            Vec::new()
        });
        rows_into_domain(rows)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<DayIndexEntry> {
        let rows = sqlx::query_as::<_, DayIndexEntryRaw>(
            r#"
            SELECT * FROM day_index
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Unable to query day index for user {}. Err: {:?}",
                user_id, e
            );
            Vec::new()
        });
        rows_into_domain(rows)
    }
}
