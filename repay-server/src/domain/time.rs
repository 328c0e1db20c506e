//! Arrival timestamps and delay derivation.
//!
//! Timestamps carry minute precision. The delay between two of them is a
//! signed, possibly fractional, number of minutes: negative means the train
//! arrived early.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Milliseconds in one minute.
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Error returned when parsing an invalid date or time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A point in time with minute precision.
///
/// # Examples
///
/// ```
/// use repay_server::domain::Timestamp;
///
/// let ts = Timestamp::parse("2024-03-15", "14:30").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-15 14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Create a timestamp, dropping any seconds and sub-second component.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self(date.and_time(time))
    }

    /// Create a timestamp from a datetime, dropping seconds.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self::new(dt.date(), dt.time())
    }

    /// Parse a timestamp from separate date and time text.
    ///
    /// The date is `YYYY-MM-DD`. The time is `HH:MM`, or `HHMM` when the text
    /// is exactly four characters long.
    ///
    /// # Examples
    ///
    /// ```
    /// use repay_server::domain::Timestamp;
    ///
    /// assert!(Timestamp::parse("2024-03-15", "09:05").is_ok());
    /// assert!(Timestamp::parse("2024-03-15", "0905").is_ok());
    ///
    /// assert!(Timestamp::parse("2024-13-15", "09:05").is_err());
    /// assert!(Timestamp::parse("2024-03-15", "24:00").is_err());
    /// assert!(Timestamp::parse("", "09:05").is_err());
    /// ```
    pub fn parse(date: &str, time: &str) -> Result<Self, TimeError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        Ok(Self(date.and_time(time)))
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the signed number of minutes from `earlier` to `self`.
    pub fn minutes_since(&self, earlier: Timestamp) -> f64 {
        let millis = self.0.signed_duration_since(earlier.0).num_milliseconds();
        millis as f64 / MILLIS_PER_MINUTE
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}",
            self.0.date(),
            self.0.hour(),
            self.0.minute()
        )
    }
}

/// Derive the delay in minutes between an expected and an actual arrival.
///
/// Returns `None` when either timestamp is absent. No rounding is applied.
///
/// # Examples
///
/// ```
/// use repay_server::domain::{Timestamp, delay_minutes};
///
/// let expected = Timestamp::parse("2024-03-15", "10:00").ok();
/// let actual = Timestamp::parse("2024-03-15", "10:20").ok();
/// assert_eq!(delay_minutes(expected, actual), Some(20.0));
/// assert_eq!(delay_minutes(actual, expected), Some(-20.0));
/// assert_eq!(delay_minutes(expected, None), None);
/// ```
pub fn delay_minutes(expected: Option<Timestamp>, actual: Option<Timestamp>) -> Option<f64> {
    let (expected, actual) = (expected?, actual?);
    Some(actual.minutes_since(expected))
}

/// A coarse description of how late a train was, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayBand {
    UnderFifteen,
    FifteenToTwentyNine,
    ThirtyToFiftyNine,
    SixtyToOneNineteen,
    OverOneTwenty,
}

impl DelayBand {
    /// Classify a delay. Early arrivals fall into the lowest band.
    pub fn from_minutes(delay: f64) -> Self {
        if delay < 15.0 {
            DelayBand::UnderFifteen
        } else if delay < 30.0 {
            DelayBand::FifteenToTwentyNine
        } else if delay < 60.0 {
            DelayBand::ThirtyToFiftyNine
        } else if delay < 120.0 {
            DelayBand::SixtyToOneNineteen
        } else {
            DelayBand::OverOneTwenty
        }
    }

    /// Returns the display label for this band.
    pub fn label(&self) -> &'static str {
        match self {
            DelayBand::UnderFifteen => "Less than 15 minutes",
            DelayBand::FifteenToTwentyNine => "15-29 minutes",
            DelayBand::ThirtyToFiftyNine => "30-59 minutes",
            DelayBand::SixtyToOneNineteen => "60-119 minutes",
            DelayBand::OverOneTwenty => "Over 120 minutes",
        }
    }
}

impl fmt::Display for DelayBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse `YYYY-MM-DD`.
fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 {
        return Err(TimeError::new("expected YYYY-MM-DD date"));
    }

    let year = parse_digits(&bytes[0..4]).ok_or_else(|| TimeError::new("invalid year digits"))?;
    let month =
        parse_digits(&bytes[5..7]).ok_or_else(|| TimeError::new("invalid month digits"))?;
    let day = parse_digits(&bytes[8..10]).ok_or_else(|| TimeError::new("invalid day digits"))?;

    if !(1..=12).contains(&month) {
        return Err(TimeError::new("month must be 1-12"));
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimeError::new("day out of range for month"))
}

/// Parse `HH:MM`, or `HHMM` for four-character input.
fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    let bytes = s.as_bytes();
    let minute_index = if bytes.len() == 4 { 2 } else { 3 };
    if bytes.len() < minute_index + 2 {
        return Err(TimeError::new("expected HH:MM time"));
    }

    let hour = parse_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute = parse_digits(&bytes[minute_index..minute_index + 2])
        .ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse a run of ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        acc.checked_mul(10)?.checked_add(digit)
    })
}
