mod day_index;

pub use day_index::{IDayIndexRepo, InMemoryDayIndexRepo, PostgresDayIndexRepo};

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub day_index: Arc<dyn IDayIndexRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            day_index: Arc::new(PostgresDayIndexRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            day_index: Arc::new(InMemoryDayIndexRepo::new()),
        }
    }
}
