//! Time-of-day values and the duration calculator.
//!
//! Same-day only: an out time at or before the in time yields no duration.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockTimeError {
    #[error("time is empty")]
    Empty,

    #[error("'{0}' is not a time of day in HH:MM form")]
    Malformed(String),
}

impl ClockTime {
    /// Parse `HH:MM` (24-hour clock).
    pub fn parse(input: &str) -> Result<Self, ClockTimeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ClockTimeError::Empty);
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| ClockTimeError::Malformed(trimmed.to_string()))
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Elapsed time between two [`ClockTime`]s. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElapsedTime {
    minutes: u32,
}

impl ElapsedTime {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// Zero-padded `HH:MM`.
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Elapsed time from `in_time` to `out_time`.
///
/// Returns `None` when either side is blank or malformed, or when `out_time`
/// is not strictly later than `in_time`. Callers that need to tell those
/// cases apart parse with [`ClockTime::parse`] first.
pub fn compute_duration(in_time: &str, out_time: &str) -> Option<ElapsedTime> {
    let start = ClockTime::parse(in_time).ok()?;
    let end = ClockTime::parse(out_time).ok()?;
    between(start, end)
}

/// Same as [`compute_duration`] on already-parsed values.
pub fn between(start: ClockTime, end: ClockTime) -> Option<ElapsedTime> {
    let (start, end) = (start.minutes_since_midnight(), end.minutes_since_midnight());
    (end > start).then(|| ElapsedTime::from_minutes(end - start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ninety_minutes("09:00", "10:30", Some("01:30"))]
    #[case::backwards("10:00", "09:00", None)]
    #[case::same_time("09:00", "09:00", None)]
    #[case::whole_day("00:00", "23:59", Some("23:59"))]
    #[case::one_minute("12:59", "13:00", Some("00:01"))]
    #[case::missing_in("", "10:00", None)]
    #[case::missing_out("09:00", "", None)]
    #[case::malformed("9am", "10:00", None)]
    #[case::out_of_range("09:00", "25:00", None)]
    fn computes_duration(#[case] in_time: &str, #[case] out_time: &str, #[case] expected: Option<&str>) {
        let got = compute_duration(in_time, out_time).map(|d| d.to_string());
        assert_eq!(got.as_deref(), expected);
    }

    #[test]
    fn parse_distinguishes_empty_from_malformed() {
        assert_eq!(ClockTime::parse("  "), Err(ClockTimeError::Empty));
        assert!(matches!(ClockTime::parse("12:60"), Err(ClockTimeError::Malformed(_))));
    }

    #[test]
    fn parse_reports_minutes_since_midnight() {
        let t = ClockTime::parse("01:15").unwrap();
        assert_eq!(t.minutes_since_midnight(), 75);
        assert_eq!(t.to_string(), "01:15");
    }

    #[test]
    fn elapsed_time_is_zero_padded() {
        assert_eq!(ElapsedTime::from_minutes(5).to_string(), "00:05");
        assert_eq!(ElapsedTime::from_minutes(600).to_string(), "10:00");
    }
}
