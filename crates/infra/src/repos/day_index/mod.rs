mod inmemory;
mod postgres;

pub use inmemory::InMemoryDayIndexRepo;
pub use postgres::PostgresDayIndexRepo;

use birthday_scheduler_domain::{BirthdayKey, DayIndexEntry, ID};

#[async_trait::async_trait]
pub trait IDayIndexRepo: Send + Sync {
    /// Inserts the entry, replacing any existing entry for the same
    /// `(birthday_key, user_id)` pair.
    async fn upsert(&self, entry: &DayIndexEntry) -> anyhow::Result<()>;
    /// Removes and returns the entry for the pair, if it exists. Storage
    /// errors are logged by the implementation and reported as `None`.
    async fn delete(&self, key: &BirthdayKey, user_id: &ID) -> Option<DayIndexEntry>;
    async fn find_by_key(&self, key: &BirthdayKey) -> Vec<DayIndexEntry>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<DayIndexEntry>;
}
