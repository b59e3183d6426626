use super::IGreetingService;
use birthday_scheduler_domain::BirthdayNotification;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct WebhookGreetingService {
    url: String,
    client: Client,
}

impl WebhookGreetingService {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl IGreetingService for WebhookGreetingService {
    async fn send(&self, notification: &BirthdayNotification) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .json(notification)
            .timeout(DELIVERY_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Greeting webhook POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        if !res.status().is_success() {
            error!(
                "[Unexpected Response] Greeting webhook returned {} for user {}",
                res.status(),
                notification.user_id
            );
            anyhow::bail!("greeting webhook returned {}", res.status());
        }
        info!(
            "Birthday greeting for user {} sent to webhook",
            notification.user_id
        );
        Ok(())
    }
}
