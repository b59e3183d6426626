use crate::birthday_checker::CheckBirthdaysUseCase;
use crate::shared::usecase::execute;
use birthday_scheduler_infra::BirthdayContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tracing::warn;

/// The checker runs on the hour and half hour
const CHECK_INTERVAL_SECS: u64 = 30 * 60;

/// Seconds until the next interval boundary. Lands exactly on the boundary
/// and never returns zero: a tick right on the boundary waits a full
/// interval.
pub fn get_start_delay(now_ts_secs: u64, interval_secs: u64) -> u64 {
    interval_secs - now_ts_secs % interval_secs
}

pub fn start_birthday_checker_job(ctx: BirthdayContext) {
    actix_web::rt::spawn(async move {
        let now_secs = (ctx.sys.get_timestamp_millis() / 1000).max(0) as u64;
        let start =
            Instant::now() + Duration::from_secs(get_start_delay(now_secs, CHECK_INTERVAL_SECS));
        let mut ticker = interval_at(start, Duration::from_secs(CHECK_INTERVAL_SECS));

        // Only one check may be in flight; a tick that arrives while the
        // previous check still runs is skipped, never run concurrently.
        let check_gate = Arc::new(tokio::sync::Mutex::new(()));
        loop {
            ticker.tick().await;
            let guard = match check_gate.clone().try_lock_owned() {
                Ok(guard) => guard,
                Err(_) => {
                    warn!("Previous birthday check still running, skipping this tick");
                    continue;
                }
            };
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _guard = guard;
                let _ = execute(CheckBirthdaysUseCase, &context).await;
            });
        }
    });
}
