//! Event records and their caller-facing data shape.
//!
//! [`EventData`] is what callers submit and what snapshots and exports
//! contain: `{name, startTime, endTime, description, category}`.
//! [`EventRecord`] is the validated, immutable form kept in the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::interval::TimeInterval;

/// Process-local identity of a stored event.
///
/// Generated when a record is created or hydrated. It is not persisted, so
/// it is only stable for the lifetime of one loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Category of an event.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Work,
    Personal,
    Others,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Unvalidated event fields as supplied by a caller or read from a snapshot.
///
/// Field order is the persisted and exported order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl EventData {
    pub fn new(name: impl Into<String>, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

/// A validated event stored under some [`DateKey`](crate::DateKey).
///
/// The start and end text is kept as given (trimmed), so `9:05` is saved
/// and exported as `9:05` while overlap checks use the parsed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    id: EventId,
    name: String,
    start_time: String,
    end_time: String,
    interval: TimeInterval,
    description: String,
    category: Category,
}

impl EventRecord {
    /// Validate caller data into a record with a fresh id.
    ///
    /// Name, start and end are required; blank counts as missing.
    pub fn from_data(data: EventData) -> Result<Self> {
        if data.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if data.start_time.trim().is_empty() {
            return Err(ValidationError::MissingField("startTime").into());
        }
        if data.end_time.trim().is_empty() {
            return Err(ValidationError::MissingField("endTime").into());
        }
        let start_time = data.start_time.trim().to_string();
        let end_time = data.end_time.trim().to_string();
        let interval = TimeInterval::parse(&start_time, &end_time)?;

        Ok(Self {
            id: EventId::new(),
            name: data.name,
            start_time,
            end_time,
            interval,
            description: data.description,
            category: data.category,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Start time as the caller wrote it.
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Back to the caller-facing shape.
    pub fn to_data(&self) -> EventData {
        EventData {
            name: self.name.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            category: self.category,
        }
    }
}

impl Serialize for EventRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_data().serialize(serializer)
    }
}
