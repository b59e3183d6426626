use super::IDayIndexRepo;
use birthday_scheduler_domain::{BirthdayKey, DayIndexEntry, ID};

pub struct InMemoryDayIndexRepo {
    entries: std::sync::Mutex<Vec<DayIndexEntry>>,
}

impl InMemoryDayIndexRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDayIndexRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDayIndexRepo for InMemoryDayIndexRepo {
    async fn upsert(&self, entry: &DayIndexEntry) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| !(e.birthday_key == entry.birthday_key && e.user_id == entry.user_id));
        entries.push(entry.clone());
        Ok(())
    }

    async fn delete(&self, key: &BirthdayKey, user_id: &ID) -> Option<DayIndexEntry> {
        let mut entries = self.entries.lock().unwrap();
        let position = entries
            .iter()
            .position(|e| e.birthday_key == *key && e.user_id == *user_id)?;
        Some(entries.remove(position))
    }

    async fn find_by_key(&self, key: &BirthdayKey) -> Vec<DayIndexEntry> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter(|e| e.birthday_key == *key)
            .cloned()
            .collect()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<DayIndexEntry> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect()
    }
}
