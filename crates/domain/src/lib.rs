mod change_event;
mod date;
mod day_index;
mod notification;
mod occurrence;
mod schedule;
mod shared;
mod user;

pub use change_event::ChangeEvent;
pub use date::{get_month_length, is_leap_year, BirthDate, InvalidDateError};
pub use day_index::{day_window_keys, BirthdayKey, DayIndexEntry, InvalidBirthdayKeyError};
pub use notification::{
    BirthdayNotification, InvalidNotificationTime, NotificationTime, NotificationType,
};
pub use occurrence::{next_occurrence, OccurrenceError};
pub use schedule::Schedule;
pub use shared::entity::{InvalidIDError, ID};
pub use user::User;
