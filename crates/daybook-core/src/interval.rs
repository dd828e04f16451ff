//! Half-open time-of-day ranges and overlap detection.
//!
//! Times are wall-clock `HH:MM` strings stored as minutes past midnight.
//! An interval `[start, end)` must have positive length.

use std::fmt;

use crate::error::{CoreError, Result, ValidationError};

const MINUTES_PER_HOUR: u16 = 60;

/// A half-open `[start, end)` range of minutes past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: u16,
    end: u16,
}

impl TimeInterval {
    /// Parse a pair of `HH:MM` strings into an interval.
    ///
    /// Fails with a validation error if either string is not a wall-clock
    /// time, and with [`CoreError::InvalidInterval`] if `end <= start`.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_min = parse_minutes("startTime", start)?;
        let end_min = parse_minutes("endTime", end)?;
        Self::from_minutes(start_min, end_min)
    }

    /// Build an interval from minute offsets.
    pub fn from_minutes(start: u16, end: u16) -> Result<Self> {
        if end <= start {
            return Err(CoreError::InvalidInterval {
                start: format_minutes(start),
                end: format_minutes(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// True iff the two ranges share at least one minute.
    ///
    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains_minute(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// Start time in canonical `HH:MM` form.
    pub fn start_str(&self) -> String {
        format_minutes(self.start)
    }

    /// End time in canonical `HH:MM` form.
    pub fn end_str(&self) -> String {
        format_minutes(self.end)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_str(), self.end_str())
    }
}

/// Parse `HH:MM` (one- or two-digit hour) into minutes past midnight.
pub fn parse_minutes(field: &'static str, value: &str) -> std::result::Result<u16, ValidationError> {
    let invalid = || ValidationError::InvalidTime {
        field,
        value: value.to_string(),
    };

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes >= MINUTES_PER_HOUR {
        return Err(invalid());
    }
    Ok(hours * MINUTES_PER_HOUR + minutes)
}

/// Format minutes past midnight as zero-padded `HH:MM`.
pub fn format_minutes(minutes: u16) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}
