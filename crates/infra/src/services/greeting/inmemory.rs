use super::IGreetingService;
use birthday_scheduler_domain::BirthdayNotification;

pub struct InMemoryGreetingService {
    sent: std::sync::Mutex<Vec<BirthdayNotification>>,
}

impl InMemoryGreetingService {
    pub fn new() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<BirthdayNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryGreetingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IGreetingService for InMemoryGreetingService {
    async fn send(&self, notification: &BirthdayNotification) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
