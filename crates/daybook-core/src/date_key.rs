//! Calendar-day and calendar-month identifiers.
//!
//! A [`DateKey`] is the `YYYY-MM-DD` string events are grouped by. It is
//! always derived from local wall-clock date components, never UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Weekday};

use crate::error::ValidationError;

const MAX_YEAR: i32 = 9999;

/// Canonical identifier of a calendar day, rendered as `YYYY-MM-DD`.
///
/// Ordering is chronological, which matches lexical order of the rendered
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Key for `date`. Years outside `0000..=9999` do not fit `YYYY`.
    pub fn from_date(date: NaiveDate) -> Result<Self, ValidationError> {
        if (0..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(ValidationError::InvalidDateKey(date.to_string()))
        }
    }

    /// Key for the local calendar day of `instant`.
    pub fn from_local<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<Self, ValidationError> {
        Self::from_date(instant.with_timezone(&Local).date_naive())
    }

    pub fn today() -> Result<Self, ValidationError> {
        Self::from_local(&Local::now())
    }

    /// Parse a strictly zero-padded `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDateKey(value.to_string());
        let bytes = value.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-indexed month.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year(),
            month: self.month(),
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build from a year and a 1-indexed month.
    ///
    /// Out-of-range months roll over into neighbouring years: month 0 is
    /// December of the previous year, month 13 is January of the next.
    pub fn new(year: i32, month: i32) -> Self {
        let total = year as i64 * 12 + (month as i64 - 1);
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn current() -> Result<Self, ValidationError> {
        Ok(DateKey::today()?.month_key())
    }

    /// Parse a zero-padded `YYYY-MM` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMonth(value.to_string());
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-indexed month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        key.year() == self.year && key.month() == self.month
    }

    pub fn pred(&self) -> Self {
        Self::new(self.year, self.month as i32 - 1)
    }

    pub fn succ(&self) -> Self {
        Self::new(self.year, self.month as i32 + 1)
    }

    pub fn first_day(&self) -> Option<DateKey> {
        self.day(1)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.succ();
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next.year, next.month, 1),
        ) {
            (Some(first), Some(following)) => (following - first).num_days() as u32,
            _ => 0,
        }
    }

    pub fn day(&self, day: u32) -> Option<DateKey> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).and_then(|d| DateKey::from_date(d).ok())
    }

    /// Calendar grid cells for this month, weeks starting on Sunday.
    ///
    /// Leading `None` cells pad the first week up to the weekday of the 1st.
    pub fn grid(&self) -> Vec<Option<u32>> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        let leading = first.date().weekday().num_days_from_sunday() as usize;
        let mut cells = vec![None; leading];
        cells.extend((1..=self.days_in_month()).map(Some));
        cells
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
