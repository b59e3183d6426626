use birthday_scheduler_domain::ID;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Serializes schedule mutations per user. Change events for different
/// users may run concurrently, but the cancel/register steps of two events
/// for the same user must never interleave.
#[derive(Default)]
pub struct UserLockRegistry {
    locks: Mutex<HashMap<ID, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLockRegistry {
    pub async fn acquire(&self, user_id: &ID) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            locks.entry(user_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
