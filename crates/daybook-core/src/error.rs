//! Core error types for daybook-core.
//!
//! Every rejected operation is classified here and handed back to the
//! caller. None of these errors is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

use crate::date_key::DateKey;
use crate::event::EventId;

/// Core error type for daybook-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required field is missing or malformed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// End time does not come after start time
    #[error("Invalid interval: end time ({end}) must be after start time ({start})")]
    InvalidInterval { start: String, end: String },

    /// The new event collides with one already stored on that day
    #[error("Event overlaps with '{conflicting}' ({interval}) on {date}")]
    Overlap {
        date: DateKey,
        conflicting: String,
        interval: String,
    },

    /// Positional delete with a stale or invalid index
    #[error("Index {index} out of range for {date} (events: {len})")]
    IndexOutOfRange {
        date: DateKey,
        index: usize,
        len: usize,
    },

    /// No event with this id on the given day
    #[error("No event {id} on {date}")]
    NotFound { date: DateKey, id: EventId },

    /// Snapshot load/save errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors on caller-supplied event data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field left blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Time text is not a wall-clock `HH:MM`
    #[error("Invalid time for '{field}': '{value}' (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    /// Category outside Work/Personal/Others
    #[error("Unknown category: '{0}' (expected Work, Personal or Others)")]
    UnknownCategory(String),

    /// Date text is not a `YYYY-MM-DD` calendar day
    #[error("Invalid date key: '{0}' (expected YYYY-MM-DD)")]
    InvalidDateKey(String),

    /// Month text is not `YYYY-MM`
    #[error("Invalid month: '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),
}

/// Snapshot persistence errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read the snapshot
    #[error("Failed to load snapshot from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the snapshot
    #[error("Failed to save snapshot to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Snapshot text is not the expected JSON shape
    #[error("Malformed snapshot: {0}")]
    Malformed(String),

    /// In-memory adapter lock poisoned
    #[error("Snapshot storage unavailable: {0}")]
    Unavailable(String),

    /// Saving is disabled because the existing snapshot was never loaded
    #[error("Snapshot not saved, the existing one could not be loaded: {0}")]
    NotLoaded(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
