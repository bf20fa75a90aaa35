//! EmotionalSignal value object and its time-context fields.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Emotion;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Lowest accepted intensity.
pub const MIN_INTENSITY: u8 = 1;

/// Highest accepted intensity.
pub const MAX_INTENSITY: u8 = 5;

/// Day of the week the signal was captured on, in the user's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }

    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayOfWeek::Sat | DayOfWeek::Sun)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    /// Accepts `Mon`..`Sun` and full English names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::from_str(s.trim())
            .map(DayOfWeek::from)
            .map_err(|_| {
                ValidationError::invalid_format("day_of_week", format!("unknown day '{}'", s))
            })
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayOfWeek> for String {
    fn from(day: DayOfWeek) -> Self {
        day.as_str().to_string()
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a strict 24-hour `HH:MM` string into (hour, minute).
pub fn parse_time_of_day(value: &str) -> Result<(u8, u8), ValidationError> {
    let bytes = value.as_bytes();
    let digits_ok = bytes.len() == 5
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !digits_ok || bytes[2] != b':' {
        return Err(ValidationError::invalid_format(
            "time_of_day",
            format!("expected HH:MM, got '{}'", value),
        ));
    }
    let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        ValidationError::invalid_format("time_of_day", format!("'{}': {}", value, e))
    })?;
    Ok((time.hour() as u8, time.minute() as u8))
}

/// The user's emotional state captured at order time.
///
/// Fields are kept as received from the capture flow; [`validate`] is the
/// gate that rejects malformed values before the engine reads them.
///
/// [`validate`]: EmotionalSignal::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalSignal {
    pub emotion: Emotion,
    /// 1 (barely) to 5 (overwhelming).
    pub intensity: u8,
    /// Local wall-clock time, `HH:MM`.
    pub time_of_day: String,
    /// Local hour, 0-23. Must agree with `time_of_day`.
    pub hour: u8,
    pub day_of_week: DayOfWeek,
    pub captured_at: Timestamp,
}

impl EmotionalSignal {
    /// Captures a signal at the given zoned instant.
    ///
    /// Time-of-day, hour and weekday come from the local clock of `at`;
    /// `captured_at` is the same instant in UTC.
    pub fn capture<Tz: TimeZone>(
        emotion: Emotion,
        intensity: u8,
        at: &DateTime<Tz>,
    ) -> Result<Self, ValidationError> {
        let signal = Self {
            emotion,
            intensity,
            time_of_day: format!("{:02}:{:02}", at.hour(), at.minute()),
            hour: at.hour() as u8,
            day_of_week: DayOfWeek::from(at.weekday()),
            captured_at: Timestamp::from_datetime(at.with_timezone(&Utc)),
        };
        signal.validate()?;
        Ok(signal)
    }

    /// Checks intensity and time fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(ValidationError::out_of_range(
                "intensity",
                i32::from(MIN_INTENSITY),
                i32::from(MAX_INTENSITY),
                i32::from(self.intensity),
            ));
        }
        if self.hour > 23 {
            return Err(ValidationError::out_of_range(
                "hour",
                0,
                23,
                i32::from(self.hour),
            ));
        }
        let (clock_hour, _) = parse_time_of_day(&self.time_of_day)?;
        if clock_hour != self.hour {
            return Err(ValidationError::invalid_format(
                "hour",
                format!(
                    "hour {} disagrees with time_of_day {}",
                    self.hour, self.time_of_day
                ),
            ));
        }
        Ok(())
    }

    /// Returns true when both signals report the same emotion category.
    pub fn same_emotion_as(&self, other: &EmotionalSignal) -> bool {
        self.emotion == other.emotion
    }
}
