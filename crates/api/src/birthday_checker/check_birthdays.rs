use crate::shared::usecase::UseCase;
use birthday_scheduler_domain::{
    day_window_keys, BirthdayNotification, DayIndexEntry, NotificationTime,
};
use birthday_scheduler_infra::BirthdayContext;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{error, info};

const NOTIFICATION_WINDOW_SECS: i64 = 5 * 60;

/// The coarse fallback path: re-derives birthday candidates from the day
/// index and fires greetings for everyone whose local notification time is
/// close enough to now. Runs uncoordinated with the exact per-user
/// triggers and keeps no memory between invocations.
#[derive(Debug)]
pub struct CheckBirthdaysUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckBirthdaysUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckBirthdays";

    async fn execute(&mut self, ctx: &BirthdayContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        info!("Birthday checker started at: {}", now);

        let mut candidates = Vec::new();
        for key in day_window_keys(now.date_naive()) {
            candidates.extend(ctx.repos.day_index.find_by_key(&key).await);
        }

        if candidates.is_empty() {
            info!("No users with birthdays found around today");
            return Ok(0);
        }

        let mut notified = 0;
        for entry in candidates {
            if !within_notification_window(&entry, now, ctx.config.notification_time) {
                continue;
            }
            info!(
                "Triggering birthday notification for user {} ({} {})",
                entry.user_id, entry.first_name, entry.last_name
            );
            match ctx
                .services
                .greetings
                .send(&BirthdayNotification::for_entry(&entry))
                .await
            {
                Ok(_) => notified += 1,
                Err(e) => error!(
                    "Unable to deliver birthday greeting for user {}: {:?}",
                    entry.user_id, e
                ),
            }
        }
        Ok(notified)
    }
}

/// Whether the entry's local notification time on their birthday is within
/// five minutes of now, in either direction.
fn within_notification_window(
    entry: &DayIndexEntry,
    now: DateTime<Utc>,
    at: NotificationTime,
) -> bool {
    let now_local = now.with_timezone(&entry.timezone).naive_local();
    let (month, day) = entry.birthday_key.month_day_in(now_local.year());
    let target = NaiveDate::from_ymd_opt(now_local.year(), month, day)
        .and_then(|date| date.and_hms_opt(at.hour(), at.minute(), 0));
    match target {
        Some(target) => (now_local - target).num_seconds().abs() <= NOTIFICATION_WINDOW_SECS,
        None => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use birthday_scheduler_domain::User;
    use birthday_scheduler_infra::{
        Config, ISys, InMemoryGreetingService, InMemoryTriggerBackend, Repos, Services,
        UserLockRegistry,
    };
    use std::sync::Arc;

    struct StaticTimeSys(DateTime<Utc>);
    impl ISys for StaticTimeSys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct TestContext {
        ctx: BirthdayContext,
        greetings: Arc<InMemoryGreetingService>,
    }

    fn setup(now: &str) -> TestContext {
        let greetings = Arc::new(InMemoryGreetingService::new());
        let services = Services {
            trigger_backend: Arc::new(InMemoryTriggerBackend::new()),
            greetings: greetings.clone(),
        };
        let ctx = BirthdayContext {
            repos: Repos::create_inmemory(),
            services,
            config: Config::new(),
            user_locks: Arc::new(UserLockRegistry::default()),
            sys: Arc::new(StaticTimeSys(
                DateTime::parse_from_rfc3339(now).unwrap().with_timezone(&Utc),
            )),
        };
        TestContext { ctx, greetings }
    }

    fn entry(birth_date: &str, timezone: &str) -> DayIndexEntry {
        let user = User {
            id: Default::default(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            birth_date: birth_date.parse().unwrap(),
            timezone: timezone.parse().unwrap(),
        };
        DayIndexEntry::from_user(&user, 0)
    }

    #[actix_web::main]
    #[test]
    async fn fires_within_five_minutes_of_the_local_target() {
        // 13:03 UTC is 09:03 in New York on the birthday itself
        let TestContext { ctx, greetings } = setup("2024-05-15T13:03:00Z");
        let entry = entry("1990-05-15", "America/New_York");
        ctx.repos.day_index.upsert(&entry).await.unwrap();

        let notified = execute(CheckBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(notified, 1);
        let sent = greetings.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].user_id, entry.user_id);
    }

    #[actix_web::main]
    #[test]
    async fn does_not_fire_outside_the_window() {
        // 09:08:01 local, just over five minutes past the target
        let TestContext { ctx, greetings } = setup("2024-05-15T13:08:01Z");
        let entry = entry("1990-05-15", "America/New_York");
        ctx.repos.day_index.upsert(&entry).await.unwrap();

        let notified = execute(CheckBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(notified, 0);
        assert!(greetings.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn catches_users_whose_local_day_is_ahead_of_utc() {
        // 21:02 UTC on May 15 is already 09:02 on May 16 in Auckland, so
        // the candidate comes from the "tomorrow" bucket.
        let TestContext { ctx, greetings } = setup("2024-05-15T21:02:00Z");
        let entry = entry("1990-05-16", "Pacific/Auckland");
        ctx.repos.day_index.upsert(&entry).await.unwrap();

        let notified = execute(CheckBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(notified, 1);
        assert_eq!(greetings.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn ignores_candidates_on_other_days() {
        let TestContext { ctx, greetings } = setup("2024-05-15T13:03:00Z");
        // Same key bucket, but the birthday is a day earlier so the local
        // difference is about a day
        let entry = entry("1990-05-14", "America/New_York");
        ctx.repos.day_index.upsert(&entry).await.unwrap();

        let notified = execute(CheckBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(notified, 0);
        assert!(greetings.sent().is_empty());
    }

    #[test]
    fn window_boundary_is_five_minutes() {
        let entry = entry("1990-05-15", "America/New_York");
        let at = NotificationTime::new(9, 0).unwrap();
        let now = |s: &str| {
            DateTime::parse_from_rfc3339(s)
                .unwrap()
                .with_timezone(&Utc)
        };

        // 08:55 and 09:05 local are inside, 08:54:59 and 09:05:01 are not
        assert!(within_notification_window(&entry, now("2024-05-15T12:55:00Z"), at));
        assert!(within_notification_window(&entry, now("2024-05-15T13:05:00Z"), at));
        assert!(!within_notification_window(&entry, now("2024-05-15T12:54:59Z"), at));
        assert!(!within_notification_window(&entry, now("2024-05-15T13:05:01Z"), at));
    }
}
