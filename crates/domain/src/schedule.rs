use crate::{notification::NotificationType, shared::entity::ID};
use chrono::{DateTime, Utc};

/// A one-shot trigger registration in the trigger backend. Identity is the
/// `(notification_type, user_id)` pair, rendered as the deterministic
/// trigger name, and at most one live trigger exists per identity. The
/// backend owns the firing itself; this engine only registers, replaces and
/// cancels.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub notification_type: NotificationType,
    pub user_id: ID,
    pub fire_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(notification_type: NotificationType, user_id: ID, fire_at: DateTime<Utc>) -> Self {
        Self {
            notification_type,
            user_id,
            fire_at,
        }
    }

    /// The name this schedule is registered under in the trigger backend.
    pub fn name(&self) -> String {
        Self::trigger_name_for(self.notification_type, &self.user_id)
    }

    pub fn trigger_name_for(notification_type: NotificationType, user_id: &ID) -> String {
        format!("{}-{}", notification_type, user_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trigger_name_is_type_then_user() {
        let user_id = ID::new();
        let schedule = Schedule::new(NotificationType::Birthday, user_id.clone(), Utc::now());
        assert_eq!(schedule.name(), format!("birthday-{}", user_id));
    }
}
