use crate::{date::BirthDate, notification::NotificationTime};
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OccurrenceError {
    #[error("{year}-{month:02}-{day:02} is not a representable calendar date")]
    UnrepresentableDate { year: i32, month: u32, day: u32 },
    #[error("the wall clock time {wall_clock} does not exist in timezone {timezone}")]
    UnrepresentableLocalTime {
        wall_clock: NaiveDateTime,
        timezone: Tz,
    },
}

/// Computes the next future UTC instant at which the configured local time
/// of day falls on the user's birthday in their timezone.
///
/// The candidate is built from the current local year and the birthday's
/// month and day; if that wall clock has already passed locally, the year
/// is advanced by one, so the result is always strictly after `now`. The
/// UTC conversion resolves the offset at the candidate instant itself,
/// which keeps the result correct when a DST transition sits between `now`
/// and the birthday.
///
/// Feb 29 birthdays resolve to Feb 28 in non-leap target years. A candidate
/// wall clock swallowed by a DST gap moves to the first valid wall clock an
/// hour later; a wall clock that occurs twice resolves to its earlier
/// instant.
pub fn next_occurrence(
    birth_date: &BirthDate,
    timezone: Tz,
    now: DateTime<Utc>,
    at: NotificationTime,
) -> Result<DateTime<Utc>, OccurrenceError> {
    let now_local = now.with_timezone(&timezone);
    let candidate = local_occurrence(birth_date, timezone, now_local.year(), at)?;
    let candidate = if candidate <= now_local {
        local_occurrence(birth_date, timezone, now_local.year() + 1, at)?
    } else {
        candidate
    };
    Ok(candidate.with_timezone(&Utc))
}

fn local_occurrence(
    birth_date: &BirthDate,
    timezone: Tz,
    year: i32,
    at: NotificationTime,
) -> Result<DateTime<Tz>, OccurrenceError> {
    let (month, day) = birth_date.month_day_in(year);
    let wall_clock = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(at.hour(), at.minute(), 0))
        .ok_or(OccurrenceError::UnrepresentableDate { year, month, day })?;

    match timezone.from_local_datetime(&wall_clock) {
        LocalResult::Single(occurrence) => Ok(occurrence),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest),
        LocalResult::None => {
            // The wall clock falls in a DST gap; gaps are at most an hour
            // in every zone that observes one.
            let shifted = wall_clock + Duration::hours(1);
            timezone.from_local_datetime(&shifted).earliest().ok_or(
                OccurrenceError::UnrepresentableLocalTime {
                    wall_clock,
                    timezone,
                },
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Timelike;

    fn instant(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn birth_date(datestr: &str) -> BirthDate {
        datestr.parse().unwrap()
    }

    fn nine_oclock() -> NotificationTime {
        NotificationTime::new(9, 0).unwrap()
    }

    #[test]
    fn rolls_to_next_year_when_todays_time_has_passed() {
        // 2024-05-16T00:00:00Z is 2024-05-15T20:00 in New York, so this
        // year's 09:00 is already gone.
        let tz: Tz = "America/New_York".parse().unwrap();
        let occurrence = next_occurrence(
            &birth_date("1990-05-15"),
            tz,
            instant("2024-05-16T00:00:00Z"),
            nine_oclock(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2025-05-15T13:00:00Z"));
    }

    #[test]
    fn stays_in_current_year_when_time_is_still_ahead() {
        let tz: Tz = "America/New_York".parse().unwrap();
        // 08:00 local on the birthday itself
        let occurrence = next_occurrence(
            &birth_date("1990-05-15"),
            tz,
            instant("2024-05-15T12:00:00Z"),
            nine_oclock(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2024-05-15T13:00:00Z"));
    }

    #[test]
    fn resolves_the_offset_at_the_target_instant() {
        // Computed in July (EDT, UTC-4) for a December birthday (EST,
        // UTC-5): the winter offset must win.
        let tz: Tz = "America/New_York".parse().unwrap();
        let occurrence = next_occurrence(
            &birth_date("1990-12-25"),
            tz,
            instant("2024-07-01T00:00:00Z"),
            nine_oclock(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2024-12-25T14:00:00Z"));
    }

    #[test]
    fn is_strictly_future_and_idempotent() {
        let zones = ["America/New_York", "Europe/Oslo", "Pacific/Auckland", "UTC"];
        let dates = ["1990-01-01", "1985-06-30", "2000-12-31"];
        let now = instant("2024-05-16T00:00:00Z");
        for zone in &zones {
            let tz: Tz = zone.parse().unwrap();
            for date in &dates {
                let birth_date = birth_date(date);
                let first = next_occurrence(&birth_date, tz, now, nine_oclock()).unwrap();
                let second = next_occurrence(&birth_date, tz, now, nine_oclock()).unwrap();
                assert!(first > now);
                assert_eq!(first, second);
                let local = first.with_timezone(&tz);
                assert_eq!(local.hour(), 9);
                assert_eq!(local.minute(), 0);
                assert_eq!(local.second(), 0);
            }
        }
    }

    #[test]
    fn feb_29_falls_back_to_feb_28_in_non_leap_years() {
        let tz: Tz = "UTC".parse().unwrap();
        // This year's Feb 29 has passed and 2025 is not a leap year.
        let occurrence = next_occurrence(
            &birth_date("2000-02-29"),
            tz,
            instant("2024-03-05T00:00:00Z"),
            nine_oclock(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2025-02-28T09:00:00Z"));
    }

    #[test]
    fn dst_gap_moves_to_the_next_valid_wall_clock() {
        // 02:30 on 2024-03-10 does not exist in New York; the first valid
        // wall clock is 03:30 EDT.
        let tz: Tz = "America/New_York".parse().unwrap();
        let occurrence = next_occurrence(
            &birth_date("1990-03-10"),
            tz,
            instant("2024-01-01T00:00:00Z"),
            NotificationTime::new(2, 30).unwrap(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2024-03-10T07:30:00Z"));
    }

    #[test]
    fn dst_fold_resolves_to_the_earlier_instant() {
        // 01:30 on 2024-11-03 occurs twice in New York; the EDT instant
        // comes first.
        let tz: Tz = "America/New_York".parse().unwrap();
        let occurrence = next_occurrence(
            &birth_date("1990-11-03"),
            tz,
            instant("2024-06-01T00:00:00Z"),
            NotificationTime::new(1, 30).unwrap(),
        )
        .unwrap();
        assert_eq!(occurrence, instant("2024-11-03T05:30:00Z"));
    }

    #[test]
    fn a_day_skipped_by_the_calendar_is_an_error() {
        // Samoa never had a 2011-12-30: the zone jumped across the date
        // line at the end of Dec 29.
        let tz: Tz = "Pacific/Apia".parse().unwrap();
        let res = next_occurrence(
            &birth_date("1990-12-30"),
            tz,
            instant("2011-06-01T00:00:00Z"),
            nine_oclock(),
        );
        assert!(matches!(
            res,
            Err(OccurrenceError::UnrepresentableLocalTime { .. })
        ));
    }
}
