use birthday_scheduler_domain::NotificationTime;
use std::{fmt::Display, str::FromStr};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Local wall-clock time of day at which birthday notifications fire
    pub notification_time: NotificationTime,
    /// Upper bound on processing a single user change event before it is
    /// reported as failed and left to the transport to redeliver
    pub apply_timeout_millis: u64,
    /// Postgres connection string; without it the day index lives in memory
    pub database_url: Option<String>,
    /// Base url of the one-shot trigger backend service
    pub trigger_backend_url: Option<String>,
    /// Url the birthday greeting payload is posted to on delivery
    pub greeting_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let hour = parse_env_var("BIRTHDAY_NOTIFICATION_HOUR", 9);
        let minute = parse_env_var("BIRTHDAY_NOTIFICATION_MINUTE", 0);
        let notification_time = match NotificationTime::new(hour, minute) {
            Ok(time) => time,
            Err(e) => {
                warn!(
                    "Invalid notification time configured: {}. Falling back to the default: {}.",
                    e,
                    NotificationTime::default()
                );
                NotificationTime::default()
            }
        };

        Self {
            port: parse_env_var("PORT", 5000),
            notification_time,
            apply_timeout_millis: parse_env_var("APPLY_TIMEOUT_MILLIS", 10000),
            database_url: std::env::var("DATABASE_URL").ok(),
            trigger_backend_url: std::env::var("TRIGGER_BACKEND_URL").ok(),
            greeting_webhook_url: std::env::var("GREETING_WEBHOOK_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_var<T: FromStr + Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
