mod inmemory;
mod webhook;

pub use inmemory::{InMemoryTriggerBackend, RegisteredTrigger};
pub use webhook::WebhookTriggerBackend;

use birthday_scheduler_domain::{BirthdayNotification, Schedule};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Trigger backend unavailable: {0}")]
    Unavailable(String),
}

/// The external one-shot timer service. At its firing instant the backend
/// itself invokes the greeting delivery with the registered payload; this
/// engine only ever registers and cancels.
#[async_trait::async_trait]
pub trait ITriggerBackend: Send + Sync {
    /// Registers the trigger under its deterministic name, replacing any
    /// trigger already registered under that name.
    async fn register(
        &self,
        schedule: &Schedule,
        payload: &BirthdayNotification,
    ) -> Result<(), BackendError>;

    /// Cancels the named trigger. Cancelling a trigger that does not exist
    /// is success, not an error.
    async fn cancel(&self, name: &str) -> Result<(), BackendError>;
}
