use crate::{
    date::{get_month_length, is_leap_year, BirthDate},
    shared::entity::ID,
    user::User,
};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A year-independent month-day key, canonically formatted as `MM-DD`.
/// All users sharing a birthday share a key, regardless of birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthdayKey {
    pub month: u32,
    pub day: u32,
}

#[derive(Error, Debug)]
#[error("birthday key: `{0}` is malformed")]
pub struct InvalidBirthdayKeyError(pub String);

impl BirthdayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// The month and day this key falls on in the given year.
    /// Feb 29 resolves to Feb 28 when the year is not a leap year.
    pub fn month_day_in(&self, year: i32) -> (u32, u32) {
        if self.month == 2 && self.day == 29 && !is_leap_year(year) {
            (2, 28)
        } else {
            (self.month, self.day)
        }
    }
}

impl FromStr for BirthdayKey {
    type Err = InvalidBirthdayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidBirthdayKeyError(s.to_string());
        let parts = s.split('-').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(err());
        }
        let month: u32 = parts[0].parse().map_err(|_| err())?;
        let day: u32 = parts[1].parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        // Checked against a leap year so that the 02-29 key stays representable
        if day < 1 || day > get_month_length(2000, month) {
            return Err(err());
        }
        Ok(Self { month, day })
    }
}

impl Display for BirthdayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// The keys to query when scanning around a given UTC date. A user's local
/// calendar day can differ from the UTC day by up to one day in either
/// direction, so the bucket covers yesterday, today and tomorrow.
pub fn day_window_keys(date: NaiveDate) -> Vec<BirthdayKey> {
    vec![date.pred_opt(), Some(date), date.succ_opt()]
        .into_iter()
        .flatten()
        .map(BirthdayKey::from_date)
        .collect()
}

/// A single user's entry in the day-keyed birthday index, the read model
/// queried by the periodic window checker. Exactly one entry exists per
/// live user; a birth date change replaces the entry under its new key.
#[derive(Debug, Clone, PartialEq)]
pub struct DayIndexEntry {
    pub birthday_key: BirthdayKey,
    pub user_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub timezone: Tz,
    pub original_birth_date: BirthDate,
    pub created_at: i64,
}

impl DayIndexEntry {
    pub fn from_user(user: &User, created_at: i64) -> Self {
        Self {
            birthday_key: user.birth_date.birthday_key(),
            user_id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            timezone: user.timezone,
            original_birth_date: user.birth_date,
            created_at,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_is_formatted_zero_padded() {
        let key: BirthdayKey = "5-2".parse().unwrap();
        assert_eq!(key.to_string(), "05-02");
    }

    #[test]
    fn it_accepts_valid_keys() {
        for key in &["01-01", "12-31", "02-29", "5-15"] {
            assert!(key.parse::<BirthdayKey>().is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_keys() {
        for key in &["13-01", "02-30", "00-10", "1-0", "05", "a-b", "1990-05-15"] {
            assert!(key.parse::<BirthdayKey>().is_err());
        }
    }

    #[test]
    fn key_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(BirthdayKey::from_date(date).to_string(), "05-15");
    }

    #[test]
    fn window_keys_cover_adjacent_days() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let keys = day_window_keys(date);
        assert_eq!(
            keys,
            vec![
                "05-14".parse().unwrap(),
                "05-15".parse().unwrap(),
                "05-16".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn window_keys_wrap_around_year_boundaries() {
        let new_years_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let keys = day_window_keys(new_years_day);
        assert_eq!(
            keys,
            vec![
                "12-31".parse().unwrap(),
                "01-01".parse().unwrap(),
                "01-02".parse().unwrap(),
            ]
        );

        let new_years_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let keys = day_window_keys(new_years_eve);
        assert_eq!(
            keys,
            vec![
                "12-30".parse().unwrap(),
                "12-31".parse().unwrap(),
                "01-01".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn leap_day_key_resolves_to_feb_28_outside_leap_years() {
        let key: BirthdayKey = "02-29".parse().unwrap();
        assert_eq!(key.month_day_in(2024), (2, 29));
        assert_eq!(key.month_day_in(2025), (2, 28));
    }
}
