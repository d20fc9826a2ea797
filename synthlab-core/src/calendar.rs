//! Trading time index.
//!
//! The index is a regular grid anchored at midnight of the start date and
//! stepped by a fixed interval through the end of the end date. Only grid
//! points whose time of day falls inside the session window survive.
//! Weekends and exchange holidays are not special-cased.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("invalid interval '{0}': expected a positive integer followed by s, min, h or d (e.g. 5min)")]
    InvalidInterval(String),

    #[error("session opens at {open} but closes at {close}")]
    InvertedSession { open: NaiveTime, close: NaiveTime },
}

/// Sampling interval of the time grid.
///
/// Parsed from compact strings such as `30s`, `5min`, `1h` or `1d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    seconds: i64,
}

impl Interval {
    pub const FIVE_MINUTES: Interval = Interval { seconds: 300 };

    pub fn from_seconds(seconds: i64) -> Result<Self, CalendarError> {
        if seconds <= 0 {
            return Err(CalendarError::InvalidInterval(format!("{seconds}s")));
        }
        Ok(Self { seconds })
    }

    pub fn from_minutes(minutes: i64) -> Result<Self, CalendarError> {
        Self::from_seconds(minutes.saturating_mul(60))
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }
}

impl FromStr for Interval {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (count, unit) = trimmed.split_at(split);

        let count: i64 = count
            .parse()
            .map_err(|_| CalendarError::InvalidInterval(s.to_string()))?;
        let multiplier = match unit {
            "s" | "S" | "sec" => 1,
            "m" | "min" | "T" => 60,
            "h" | "H" => 3_600,
            "d" | "D" => 86_400,
            _ => return Err(CalendarError::InvalidInterval(s.to_string())),
        };

        count
            .checked_mul(multiplier)
            .filter(|secs| *secs > 0)
            .map(|seconds| Self { seconds })
            .ok_or_else(|| CalendarError::InvalidInterval(s.to_string()))
    }
}

impl TryFrom<String> for Interval {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds;
        if s % 86_400 == 0 {
            write!(f, "{}d", s / 86_400)
        } else if s % 3_600 == 0 {
            write!(f, "{}h", s / 3_600)
        } else if s % 60 == 0 {
            write!(f, "{}min", s / 60)
        } else {
            write!(f, "{s}s")
        }
    }
}

/// Daily trading session, inclusive of both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl SessionWindow {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, CalendarError> {
        let window = Self { open, close };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.open > self.close {
            return Err(CalendarError::InvertedSession {
                open: self.open,
                close: self.close,
            });
        }
        Ok(())
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.close
    }
}

/// Build the ordered trading time index.
///
/// Returns an empty index when `start > end`.
pub fn build_time_index(
    start: NaiveDate,
    end: NaiveDate,
    interval: Interval,
    session: SessionWindow,
) -> Vec<NaiveDateTime> {
    if start > end {
        return Vec::new();
    }

    let step = interval.as_duration();
    let stop = end
        .succ_opt()
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX);

    let mut index = Vec::new();
    let mut t = start.and_time(NaiveTime::MIN);
    while t < stop {
        if session.contains(t.time()) {
            index.push(t);
        }
        t = match t.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn nse_session() -> SessionWindow {
        SessionWindow::new(time(9, 15), time(15, 30)).unwrap()
    }

    #[test]
    fn parses_interval_units() {
        assert_eq!("5min".parse::<Interval>().unwrap().seconds(), 300);
        assert_eq!("5T".parse::<Interval>().unwrap().seconds(), 300);
        assert_eq!("30s".parse::<Interval>().unwrap().seconds(), 30);
        assert_eq!("1h".parse::<Interval>().unwrap().seconds(), 3_600);
        assert_eq!("2d".parse::<Interval>().unwrap().seconds(), 172_800);
    }

    #[test]
    fn rejects_bad_intervals() {
        for bad in ["", "min", "0min", "5", "5 weeks", "-5min", "5.5min"] {
            assert!(bad.parse::<Interval>().is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn interval_display_is_canonical() {
        assert_eq!(Interval::from_minutes(5).unwrap().to_string(), "5min");
        assert_eq!(Interval::from_minutes(60).unwrap().to_string(), "1h");
        assert_eq!(Interval::from_seconds(90).unwrap().to_string(), "90s");
    }

    #[test]
    fn inverted_session_rejected() {
        let err = SessionWindow::new(time(15, 30), time(9, 15)).unwrap_err();
        assert!(matches!(err, CalendarError::InvertedSession { .. }));
    }

    #[test]
    fn single_day_short_window_yields_three_points() {
        let session = SessionWindow::new(time(9, 15), time(9, 25)).unwrap();
        let index = build_time_index(
            date(2024, 1, 1),
            date(2024, 1, 1),
            Interval::from_minutes(5).unwrap(),
            session,
        );

        let times: Vec<_> = index.iter().map(|t| (t.hour(), t.minute())).collect();
        assert_eq!(times, vec![(9, 15), (9, 20), (9, 25)]);
    }

    #[test]
    fn full_session_has_76_five_minute_points_per_day() {
        let index = build_time_index(
            date(2024, 1, 1),
            date(2024, 1, 1),
            Interval::from_minutes(5).unwrap(),
            nse_session(),
        );
        // 09:15 through 15:30 inclusive
        assert_eq!(index.len(), 76);
        assert_eq!(index.first().unwrap().time(), time(9, 15));
        assert_eq!(index.last().unwrap().time(), time(15, 30));
    }

    #[test]
    fn weekends_are_not_skipped() {
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
        let index = build_time_index(
            date(2024, 1, 6),
            date(2024, 1, 7),
            Interval::from_minutes(5).unwrap(),
            nse_session(),
        );
        assert_eq!(index.len(), 152);
        assert_eq!(index[0].weekday(), Weekday::Sat);
        assert_eq!(index[151].weekday(), Weekday::Sun);
    }

    #[test]
    fn start_after_end_is_empty() {
        let index = build_time_index(
            date(2024, 2, 1),
            date(2024, 1, 1),
            Interval::from_minutes(5).unwrap(),
            nse_session(),
        );
        assert!(index.is_empty());
    }

    #[test]
    fn grid_is_anchored_at_start_midnight() {
        // A 7-minute grid from midnight lands on 09:20 and 09:27, not 09:15
        let index = build_time_index(
            date(2024, 1, 1),
            date(2024, 1, 1),
            Interval::from_minutes(7).unwrap(),
            SessionWindow::new(time(9, 15), time(9, 30)).unwrap(),
        );
        let minutes: Vec<_> = index.iter().map(|t| t.minute()).collect();
        assert_eq!(minutes, vec![20, 27]);
    }

    #[test]
    fn index_is_strictly_increasing() {
        let index = build_time_index(
            date(2024, 3, 1),
            date(2024, 3, 10),
            Interval::from_minutes(15).unwrap(),
            nse_session(),
        );
        assert!(index.windows(2).all(|w| w[0] < w[1]));
    }
}
