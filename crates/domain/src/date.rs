use crate::day_index::BirthdayKey;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A user's date of birth. Unlike most calendar dates in this codebase it
/// keeps its year: the year is needed to render the original date back out
/// to notification payloads, even though scheduling only ever uses the
/// month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Error, Debug)]
#[error("date: `{0}` is not a valid calendar date")]
pub struct InvalidDateError(pub String);

impl BirthDate {
    pub fn birthday_key(&self) -> BirthdayKey {
        BirthdayKey {
            month: self.month,
            day: self.day,
        }
    }

    /// The month and day this birthday falls on in the given year.
    /// Feb 29 resolves to Feb 28 when the year is not a leap year.
    pub fn month_day_in(&self, year: i32) -> (u32, u32) {
        self.birthday_key().month_day_in(year)
    }
}

impl FromStr for BirthDate {
    type Err = InvalidDateError;

    fn from_str(datestr: &str) -> Result<Self, Self::Err> {
        let err = || InvalidDateError(datestr.to_string());
        let dates = datestr.split('-').collect::<Vec<_>>();
        if dates.len() != 3 {
            return Err(err());
        }
        let year: i32 = dates[0].parse().map_err(|_| err())?;
        let month: u32 = dates[1].parse().map_err(|_| err())?;
        let day: u32 = dates[2].parse().map_err(|_| err())?;

        if !(1900..=2100).contains(&year) || !(1..=12).contains(&month) {
            return Err(err());
        }
        if day < 1 || day > get_month_length(year, month) {
            return Err(err());
        }

        Ok(Self { year, month, day })
    }
}

impl Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BirthDateVisitor;

        impl<'de> Visitor<'de> for BirthDateVisitor {
            type Value = BirthDate;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A calendar date on the form YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<BirthDate, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<BirthDate>()
                    .map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(BirthDateVisitor)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}
