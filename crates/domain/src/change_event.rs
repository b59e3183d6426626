use crate::{shared::entity::ID, user::User};

/// A change to a user record in the external user store. The variant is
/// decided exactly once, at the transport boundary, and carried explicitly
/// from there on.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    Created(User),
    Updated { old: User, new: User },
    Deleted(User),
}

impl ChangeEvent {
    /// The user this event concerns. For updates, old and new always refer
    /// to the same user.
    pub fn user_id(&self) -> &ID {
        match self {
            ChangeEvent::Created(user) | ChangeEvent::Deleted(user) => &user.id,
            ChangeEvent::Updated { new, .. } => &new.id,
        }
    }
}
