// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Relative time ("3 minutes ago") formatting.

use crate::i18n::Catalog;
use chrono::{DateTime, Datelike, TimeZone, Utc};

const SECONDS_PER_YEAR: i64 = 31_536_000;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;
const JUST_NOW_SECONDS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    fn full(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            TimeUnit::Year => "yr",
            TimeUnit::Month => "mo",
            TimeUnit::Day => "d",
            TimeUnit::Hour => "h",
            TimeUnit::Minute => "m",
            TimeUnit::Second => "s",
        }
    }
}

/// How long ago something happened, before localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    Ago { amount: i64, unit: TimeUnit },
    /// The timestamp was negative or not representable.
    InvalidInput,
    /// No unit matched (cannot happen for elapsed times of 10 s or more).
    Invalid,
}

/// Classify `time_ms` (milliseconds since the Unix epoch) relative to `now`.
pub fn time_ago(time_ms: i64, now: DateTime<Utc>) -> RelativeTime {
    if time_ms < 0 {
        return RelativeTime::InvalidInput;
    }
    let Some(past) = Utc.timestamp_millis_opt(time_ms).single() else {
        return RelativeTime::InvalidInput;
    };

    let elapsed = (now - past).num_seconds();
    if elapsed < JUST_NOW_SECONDS {
        return RelativeTime::JustNow;
    }

    if elapsed >= SECONDS_PER_YEAR {
        return RelativeTime::Ago { amount: elapsed / SECONDS_PER_YEAR, unit: TimeUnit::Year };
    }

    let mut months = (i64::from(now.year()) - i64::from(past.year())) * 12
        + (i64::from(now.month()) - i64::from(past.month()));
    // Not a full month yet when the day of month hasn't come around again.
    if now.day() < past.day() {
        months -= 1;
    }
    if months > 0 {
        return RelativeTime::Ago { amount: months, unit: TimeUnit::Month };
    }

    for (unit, seconds) in [
        (TimeUnit::Day, SECONDS_PER_DAY),
        (TimeUnit::Hour, SECONDS_PER_HOUR),
        (TimeUnit::Minute, SECONDS_PER_MINUTE),
        (TimeUnit::Second, 1),
    ] {
        if elapsed >= seconds {
            return RelativeTime::Ago { amount: elapsed / seconds, unit };
        }
    }
    RelativeTime::Invalid
}

impl RelativeTime {
    /// Render through the message catalog. Dense output uses unit abbreviations.
    pub fn describe(&self, catalog: &Catalog, dense: bool) -> String {
        match *self {
            RelativeTime::JustNow => catalog.text("just now"),
            RelativeTime::InvalidInput => catalog.text("Invalid Time Provided"),
            RelativeTime::Invalid => catalog.text("Invalid Time"),
            RelativeTime::Ago { amount, unit } => {
                let amount_text = amount.to_string();
                let args = [("amount", amount_text.as_str())];
                if dense {
                    let default = format!("{{amount}}{} ago", unit.abbreviation());
                    catalog.format_or(&format!("{}_ago_dense", unit.full()), &default, &args)
                } else if amount == 1 {
                    let default = format!("{{amount}} {} ago", unit.full());
                    catalog.format_or(&format!("{}_ago_one", unit.full()), &default, &args)
                } else {
                    let default = format!("{{amount}} {}s ago", unit.full());
                    catalog.format_or(&format!("{}_ago", unit.full()), &default, &args)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_recent_is_just_now() {
        let now = at(2024, 5, 10, 12, 0, 0);
        let past = now - Duration::seconds(9);
        assert_eq!(time_ago(past.timestamp_millis(), now), RelativeTime::JustNow);
    }

    #[test]
    fn test_seconds_minutes_hours_days() {
        let now = at(2024, 5, 10, 12, 0, 0);
        let cases = [
            (Duration::seconds(42), 42, TimeUnit::Second),
            (Duration::minutes(3), 3, TimeUnit::Minute),
            (Duration::hours(5), 5, TimeUnit::Hour),
            (Duration::days(2), 2, TimeUnit::Day),
        ];
        for (delta, amount, unit) in cases {
            let past = now - delta;
            assert_eq!(time_ago(past.timestamp_millis(), now), RelativeTime::Ago { amount, unit });
        }
    }

    #[test]
    fn test_calendar_months() {
        let now = at(2024, 5, 10, 12, 0, 0);
        assert_eq!(
            time_ago(at(2024, 2, 1, 0, 0, 0).timestamp_millis(), now),
            RelativeTime::Ago { amount: 3, unit: TimeUnit::Month }
        );
        // Previous month but day of month not reached yet: still days.
        assert_eq!(
            time_ago(at(2024, 4, 20, 12, 0, 0).timestamp_millis(), now),
            RelativeTime::Ago { amount: 20, unit: TimeUnit::Day }
        );
    }

    #[test]
    fn test_years() {
        let now = at(2024, 5, 10, 12, 0, 0);
        assert_eq!(
            time_ago(at(2021, 5, 1, 0, 0, 0).timestamp_millis(), now),
            RelativeTime::Ago { amount: 3, unit: TimeUnit::Year }
        );
    }

    #[test]
    fn test_negative_time_is_invalid() {
        assert_eq!(time_ago(-1, Utc::now()), RelativeTime::InvalidInput);
    }

    #[test]
    fn test_describe_forms() {
        let catalog = Catalog::english();
        let three = RelativeTime::Ago { amount: 3, unit: TimeUnit::Minute };
        assert_eq!(three.describe(&catalog, false), "3 minutes ago");
        assert_eq!(three.describe(&catalog, true), "3m ago");
        let one = RelativeTime::Ago { amount: 1, unit: TimeUnit::Hour };
        assert_eq!(one.describe(&catalog, false), "1 hour ago");
        assert_eq!(RelativeTime::JustNow.describe(&catalog, false), "just now");
    }
}
