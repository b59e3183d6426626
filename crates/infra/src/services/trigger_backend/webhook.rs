use super::{BackendError, ITriggerBackend};
use birthday_scheduler_domain::{BirthdayNotification, Schedule};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::error;

/// REST client for a trigger backend service. Registration is a PUT so that
/// re-registering an existing trigger overwrites it instead of conflicting.
pub struct WebhookTriggerBackend {
    base_url: String,
    client: Client,
}

impl WebhookTriggerBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTriggerRequest<'a> {
    fire_at: String,
    payload: &'a BirthdayNotification,
}

#[async_trait::async_trait]
impl ITriggerBackend for WebhookTriggerBackend {
    async fn register(
        &self,
        schedule: &Schedule,
        payload: &BirthdayNotification,
    ) -> Result<(), BackendError> {
        let body = RegisterTriggerRequest {
            fire_at: schedule.fire_at.to_rfc3339(),
            payload,
        };
        let res = self
            .client
            .put(format!("{}/triggers/{}", self.base_url, schedule.name()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Trigger backend PUT error. Error message: {:?}",
                    e
                );
                BackendError::Unavailable(e.to_string())
            })?;

        if !res.status().is_success() {
            error!(
                "[Unexpected Response] Trigger backend rejected registration of {}: {}",
                schedule.name(),
                res.status()
            );
            return Err(BackendError::Unavailable(res.status().to_string()));
        }
        Ok(())
    }

    async fn cancel(&self, name: &str) -> Result<(), BackendError> {
        let res = self
            .client
            .delete(format!("{}/triggers/{}", self.base_url, name))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Trigger backend DELETE error. Error message: {:?}",
                    e
                );
                BackendError::Unavailable(e.to_string())
            })?;

        // A trigger that is already gone counts as cancelled
        if res.status().is_success() || res.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        error!(
            "[Unexpected Response] Trigger backend rejected cancellation of {}: {}",
            name,
            res.status()
        );
        Err(BackendError::Unavailable(res.status().to_string()))
    }
}
