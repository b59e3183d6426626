use crate::{date::BirthDate, day_index::DayIndexEntry, shared::entity::ID, user::User};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// The kind of notification a schedule fires. Only birthdays exist today,
/// but the dimension is kept explicit so that trigger identities stay
/// unambiguous if other kinds are ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Birthday,
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Birthday => write!(f, "birthday"),
        }
    }
}

/// The payload handed to the trigger backend at registration and posted to
/// the greeting webhook on delivery. Both paths carry the identical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayNotification {
    pub user_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: BirthDate,
    pub timezone_location: Tz,
    pub notification_type: NotificationType,
}

impl BirthdayNotification {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            birth_date: user.birth_date,
            timezone_location: user.timezone,
            notification_type: NotificationType::Birthday,
        }
    }

    pub fn for_entry(entry: &DayIndexEntry) -> Self {
        Self {
            user_id: entry.user_id.clone(),
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            birth_date: entry.original_birth_date,
            timezone_location: entry.timezone,
            notification_type: NotificationType::Birthday,
        }
    }
}

/// The local wall-clock time of day at which birthday notifications go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTime {
    hour: u32,
    minute: u32,
}

#[derive(Error, Debug)]
#[error("{hour}:{minute} is not a valid time of day")]
pub struct InvalidNotificationTime {
    pub hour: u32,
    pub minute: u32,
}

impl NotificationTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidNotificationTime> {
        if hour > 23 || minute > 59 {
            return Err(InvalidNotificationTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl Default for NotificationTime {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl Display for NotificationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
