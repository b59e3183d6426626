use crate::{date::BirthDate, shared::entity::ID};
use chrono_tz::Tz;

/// A user record as observed from the external user store. The engine never
/// owns or mutates these, it only reacts to change events carrying them.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: BirthDate,
    pub timezone: Tz,
}

impl User {
    /// True when the fields that determine the notification schedule are
    /// unchanged between the two records. Renames and other edits must not
    /// touch the schedule.
    pub fn same_schedule_inputs(&self, other: &User) -> bool {
        self.birth_date == other.birth_date && self.timezone == other.timezone
    }
}
