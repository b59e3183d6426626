use super::{BackendError, ITriggerBackend};
use birthday_scheduler_domain::{BirthdayNotification, Schedule};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredTrigger {
    pub name: String,
    pub fire_at: DateTime<Utc>,
    pub payload: BirthdayNotification,
}

pub struct InMemoryTriggerBackend {
    triggers: std::sync::Mutex<Vec<RegisteredTrigger>>,
}

impl InMemoryTriggerBackend {
    pub fn new() -> Self {
        Self {
            triggers: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn registered(&self) -> Vec<RegisteredTrigger> {
        self.triggers.lock().unwrap().clone()
    }

    pub fn find(&self, name: &str) -> Option<RegisteredTrigger> {
        self.triggers
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned()
    }
}

impl Default for InMemoryTriggerBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITriggerBackend for InMemoryTriggerBackend {
    async fn register(
        &self,
        schedule: &Schedule,
        payload: &BirthdayNotification,
    ) -> Result<(), BackendError> {
        let mut triggers = self.triggers.lock().unwrap();
        let name = schedule.name();
        triggers.retain(|t| t.name != name);
        triggers.push(RegisteredTrigger {
            name,
            fire_at: schedule.fire_at,
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn cancel(&self, name: &str) -> Result<(), BackendError> {
        let mut triggers = self.triggers.lock().unwrap();
        triggers.retain(|t| t.name != name);
        Ok(())
    }
}
