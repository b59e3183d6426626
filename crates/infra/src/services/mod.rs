mod greeting;
mod trigger_backend;

pub use greeting::{IGreetingService, InMemoryGreetingService, WebhookGreetingService};
pub use trigger_backend::{
    BackendError, ITriggerBackend, InMemoryTriggerBackend, RegisteredTrigger,
    WebhookTriggerBackend,
};

use crate::config::Config;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct Services {
    pub trigger_backend: Arc<dyn ITriggerBackend>,
    pub greetings: Arc<dyn IGreetingService>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let trigger_backend: Arc<dyn ITriggerBackend> = match &config.trigger_backend_url {
            Some(url) => Arc::new(WebhookTriggerBackend::new(url.clone())),
            None => {
                warn!("TRIGGER_BACKEND_URL is not configured. One-shot triggers will only be kept in memory.");
                Arc::new(InMemoryTriggerBackend::new())
            }
        };
        let greetings: Arc<dyn IGreetingService> = match &config.greeting_webhook_url {
            Some(url) => Arc::new(WebhookGreetingService::new(url.clone())),
            None => {
                warn!("GREETING_WEBHOOK_URL is not configured. Greetings will not leave the process.");
                Arc::new(InMemoryGreetingService::new())
            }
        };
        Self {
            trigger_backend,
            greetings,
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            trigger_backend: Arc::new(InMemoryTriggerBackend::new()),
            greetings: Arc::new(InMemoryGreetingService::new()),
        }
    }
}
