//! Snapshot persistence.
//!
//! The store never reaches into storage itself. A [`PersistenceAdapter`] is
//! handed to the [`Planner`](crate::Planner), which loads once at startup and
//! saves after every accepted mutation.
//!
//! On disk a snapshot is a JSON object keyed by `YYYY-MM-DD`, each value an
//! array of `{name, startTime, endTime, description, category}`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PersistenceError;
use crate::event::EventData;

/// Full serializable state of an event store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    days: BTreeMap<String, Vec<EventData>>,
}

impl Snapshot {
    pub fn from_days(days: BTreeMap<String, Vec<EventData>>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &BTreeMap<String, Vec<EventData>> {
        &self.days
    }

    pub fn into_days(self) -> BTreeMap<String, Vec<EventData>> {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Parse snapshot JSON, skipping rows that do not have the event shape.
    ///
    /// Only a document that is not a JSON object is rejected outright.
    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| PersistenceError::Malformed(e.to_string()))?;
        let serde_json::Value::Object(entries) = value else {
            return Err(PersistenceError::Malformed("snapshot is not a JSON object".into()));
        };

        let mut days = BTreeMap::new();
        for (key, rows) in entries {
            let serde_json::Value::Array(rows) = rows else {
                warn!(key = %key, "dropping snapshot day: value is not an array");
                continue;
            };
            let parsed: Vec<EventData> = rows
                .into_iter()
                .filter_map(|row| match serde_json::from_value(row) {
                    Ok(data) => Some(data),
                    Err(e) => {
                        warn!(key = %key, error = %e, "dropping malformed snapshot row");
                        None
                    }
                })
                .collect();
            days.insert(key, parsed);
        }
        Ok(Self { days })
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Malformed(e.to_string()))
    }
}

/// Load/save boundary for store snapshots.
pub trait PersistenceAdapter {
    /// Read the last saved snapshot. A missing snapshot is an empty one.
    fn load(&self) -> Result<Snapshot, PersistenceError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for &A {
    fn load(&self) -> Result<Snapshot, PersistenceError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        (**self).save(snapshot)
    }
}

/// Snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn load(&self) -> Result<Snapshot, PersistenceError> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| PersistenceError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Snapshot::from_json(&text)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let save_failed = |message: String| PersistenceError::SaveFailed {
            path: self.path.clone(),
            message,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        let text = snapshot.to_json()?;
        std::fs::write(&self.path, text).map_err(|e| save_failed(e.to_string()))
    }
}

/// Snapshot held in memory as JSON text, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    text: Option<String>,
    saves: usize,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw snapshot text, which need not be valid.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                text: Some(text.into()),
                saves: 0,
            }),
        }
    }

    /// Last saved snapshot text.
    pub fn text(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|state| state.text.clone())
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|state| state.saves).unwrap_or(0)
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self) -> Result<Snapshot, PersistenceError> {
        let state = self
            .inner
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        match &state.text {
            Some(text) => Snapshot::from_json(text),
            None => Ok(Snapshot::default()),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let text = snapshot.to_json()?;
        let mut state = self
            .inner
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        state.text = Some(text);
        state.saves += 1;
        Ok(())
    }
}
