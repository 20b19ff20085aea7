//! Watch-time arithmetic.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use serde::{Deserialize, Serialize};

use crate::models::Profile;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Watch time in whole hours, rounded.
pub fn calculate_hours(watched_minutes: u64) -> u64 {
    (watched_minutes as f64 / 60.0).round() as u64
}

/// Watch time in whole days, rounded.
pub fn calculate_days(watched_minutes: u64) -> u64 {
    (watched_minutes as f64 / 60.0 / 24.0).round() as u64
}

/// Hours watched per day since registration, one decimal.
pub fn calculate_average_per_day(watched_minutes: u64, days_since_registration: u64) -> f64 {
    if days_since_registration == 0 {
        return 0.0;
    }
    let per_day = watched_minutes as f64 / 60.0 / days_since_registration as f64;
    (per_day * 10.0).round() / 10.0
}

/// Whole days between registration and `now`, rounded up.
pub fn days_since_registration(register_date: i64, now: DateTime<Utc>) -> u64 {
    let diff = (now.timestamp() - register_date).unsigned_abs();
    let day = SECONDS_PER_DAY as u64;
    diff.div_ceil(day)
}

/// Format a unix timestamp as a calendar date in `zone`, e.g. `5 March 2024`.
pub fn format_date<Tz>(ts: i64, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match zone.timestamp_opt(ts, 0).single() {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => String::new(),
    }
}

/// Time figures shown on the time slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimeStats {
    pub watched_minutes: u64,
    pub hours: u64,
    pub days: u64,
    pub average_per_day: f64,
    pub days_since_registration: u64,
}

impl TimeStats {
    /// Derive time figures from a profile.
    pub fn from_profile(profile: &Profile, now: DateTime<Utc>) -> Self {
        let minutes = profile.watched_time;
        let days_registered = days_since_registration(profile.register_date, now);
        Self {
            watched_minutes: minutes,
            hours: calculate_hours(minutes),
            days: calculate_days(minutes),
            average_per_day: calculate_average_per_day(minutes, days_registered),
            days_since_registration: days_registered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_days_round_half_up() {
        assert_eq!(calculate_hours(0), 0);
        assert_eq!(calculate_hours(89), 1);
        assert_eq!(calculate_hours(90), 2);
        assert_eq!(calculate_days(36 * 60), 2);
        assert_eq!(calculate_days(11 * 60), 0);
    }

    #[test]
    fn test_average_per_day() {
        assert_eq!(calculate_average_per_day(600, 0), 0.0);
        // 10 hours over 3 days
        assert_eq!(calculate_average_per_day(600, 3), 3.3);
        assert_eq!(calculate_average_per_day(60, 4), 0.3);
    }

    #[test]
    fn test_days_since_registration_rounds_up() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(days_since_registration(1_700_000_000, now), 0);
        assert_eq!(days_since_registration(1_700_000_000 - 1, now), 1);
        assert_eq!(days_since_registration(1_700_000_000 - 86_400, now), 1);
        assert_eq!(days_since_registration(1_700_000_000 - 86_401, now), 2);
        // A registration date in the future still counts the distance.
        assert_eq!(days_since_registration(1_700_000_000 + 86_400, now), 1);
    }

    #[test]
    fn test_time_stats_from_profile() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let profile = Profile {
            watched_time: 6_000,
            register_date: 1_700_000_000 - 10 * 86_400,
            ..Default::default()
        };
        let stats = TimeStats::from_profile(&profile, now);
        assert_eq!(stats.hours, 100);
        assert_eq!(stats.days, 4);
        assert_eq!(stats.days_since_registration, 10);
        assert_eq!(stats.average_per_day, 10.0);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_709_596_800, &Utc), "5 March 2024");

        // 2023-12-31T21:30:00Z is already New Year's Day at UTC+3.
        let moscow = chrono::FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(format_date(1_704_058_200, &moscow), "1 January 2024");
        assert_eq!(format_date(1_704_058_200, &Utc), "31 December 2023");
    }
}
