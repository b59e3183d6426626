use birthday_scheduler_domain::{ChangeEvent, User, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecordDTO {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub timezone_location: String,
}

#[derive(Error, Debug)]
pub enum InvalidUserRecord {
    #[error("userId: `{0}` is malformed")]
    MalformedUserId(String),
    #[error("birthDate: `{0}` is not a valid calendar date")]
    InvalidDate(String),
    #[error("timezoneLocation: `{0}` is not a recognized IANA timezone")]
    InvalidTimezone(String),
    #[error("change message carries neither newUserData nor oldUserData")]
    MissingUserData,
}

impl UserRecordDTO {
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.id.as_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            birth_date: user.birth_date.to_string(),
            timezone_location: user.timezone.to_string(),
        }
    }

    pub fn to_domain(&self) -> Result<User, InvalidUserRecord> {
        let id: ID = self
            .user_id
            .parse()
            .map_err(|_| InvalidUserRecord::MalformedUserId(self.user_id.clone()))?;
        let birth_date = self
            .birth_date
            .parse()
            .map_err(|_| InvalidUserRecord::InvalidDate(self.birth_date.clone()))?;
        let timezone: Tz = self
            .timezone_location
            .parse()
            .map_err(|_| InvalidUserRecord::InvalidTimezone(self.timezone_location.clone()))?;
        Ok(User {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date,
            timezone,
        })
    }
}

/// The wire shape of a single change message as the user store's transport
/// delivers it: the kind of change is implied by which of the two records
/// are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChangeMessageDTO {
    #[serde(default)]
    pub new_user_data: Option<UserRecordDTO>,
    #[serde(default)]
    pub old_user_data: Option<UserRecordDTO>,
}

impl UserChangeMessageDTO {
    /// Resolves the implicit wire encoding into an explicit `ChangeEvent`.
    /// This is the only place the old/new presence pattern is interpreted.
    pub fn into_change_event(self) -> Result<ChangeEvent, InvalidUserRecord> {
        match (self.new_user_data, self.old_user_data) {
            (Some(new), None) => Ok(ChangeEvent::Created(new.to_domain()?)),
            (None, Some(old)) => Ok(ChangeEvent::Deleted(old.to_domain()?)),
            (Some(new), Some(old)) => Ok(ChangeEvent::Updated {
                old: old.to_domain()?,
                new: new.to_domain()?,
            }),
            (None, None) => Err(InvalidUserRecord::MissingUserData),
        }
    }
}
