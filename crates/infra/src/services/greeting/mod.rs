mod inmemory;
mod webhook;

pub use inmemory::InMemoryGreetingService;
pub use webhook::WebhookGreetingService;

use birthday_scheduler_domain::BirthdayNotification;

/// The downstream channel that actually delivers a birthday greeting.
/// Delivery success is out of this engine's hands; a failed send is only
/// reported back so the caller can log it.
#[async_trait::async_trait]
pub trait IGreetingService: Send + Sync {
    async fn send(&self, notification: &BirthdayNotification) -> anyhow::Result<()>;
}
