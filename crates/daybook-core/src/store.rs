//! Day-keyed event store with per-day overlap enforcement.
//!
//! Each day holds its events in insertion order. Within a day no two
//! intervals overlap, and a day with no events has no entry at all.
//!
//! Positional [`EventStore::delete`] addresses an event by its index in the
//! day's current sequence. An index read before another mutation can point
//! at a different event afterwards; prefer [`EventStore::delete_by_id`].

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::date_key::{DateKey, MonthKey};
use crate::error::{CoreError, Result};
use crate::event::{EventData, EventId, EventRecord};
use crate::persistence::Snapshot;

/// Mapping from day to its ordered, non-overlapping events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    days: BTreeMap<DateKey, Vec<EventRecord>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `data` and append it to `date`.
    ///
    /// The store is left untouched on any error.
    pub fn add(&mut self, date: DateKey, data: EventData) -> Result<EventId> {
        let record = EventRecord::from_data(data)?;
        self.insert(date, record)
    }

    fn insert(&mut self, date: DateKey, record: EventRecord) -> Result<EventId> {
        if let Some(existing) = self
            .query(date)
            .iter()
            .find(|e| e.interval().overlaps(&record.interval()))
        {
            return Err(CoreError::Overlap {
                date,
                conflicting: existing.name().to_string(),
                interval: existing.interval().to_string(),
            });
        }

        let id = record.id();
        debug!(%date, %id, interval = %record.interval(), "event added");
        self.days.entry(date).or_default().push(record);
        Ok(id)
    }

    /// Remove the event at `index` within `date`'s current sequence.
    pub fn delete(&mut self, date: DateKey, index: usize) -> Result<EventRecord> {
        let len = self.query(date).len();
        self.remove_at(date, index)
            .ok_or(CoreError::IndexOutOfRange { date, index, len })
    }

    /// Remove the event with `id` from `date`.
    pub fn delete_by_id(&mut self, date: DateKey, id: EventId) -> Result<EventRecord> {
        let index = self
            .query(date)
            .iter()
            .position(|e| e.id() == id)
            .ok_or(CoreError::NotFound { date, id })?;
        self.remove_at(date, index)
            .ok_or(CoreError::NotFound { date, id })
    }

    fn remove_at(&mut self, date: DateKey, index: usize) -> Option<EventRecord> {
        let events = self.days.get_mut(&date)?;
        if index >= events.len() {
            return None;
        }
        let removed = events.remove(index);
        if events.is_empty() {
            self.days.remove(&date);
        }
        debug!(%date, id = %removed.id(), "event deleted");
        Some(removed)
    }

    /// Events of `date` in insertion order; empty if the day has none.
    pub fn query(&self, date: DateKey) -> &[EventRecord] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Locate an event anywhere in the store.
    pub fn find(&self, id: EventId) -> Option<(DateKey, usize, &EventRecord)> {
        self.days.iter().find_map(|(date, events)| {
            events
                .iter()
                .enumerate()
                .find(|(_, e)| e.id() == id)
                .map(|(i, e)| (*date, i, e))
        })
    }

    /// Every non-empty day, ascending by date.
    pub fn all_entries(&self) -> impl Iterator<Item = (DateKey, &[EventRecord])> + '_ {
        self.days.iter().map(|(date, events)| (*date, events.as_slice()))
    }

    /// Days belonging to `month`, with their events.
    pub fn month_slice(&self, month: MonthKey) -> MonthSlice {
        let days = match (month.first_day(), month.day(month.days_in_month())) {
            (Some(first), Some(last)) => self
                .days
                .range(first..=last)
                .map(|(date, events)| (*date, events.clone()))
                .collect(),
            _ => BTreeMap::new(),
        };
        MonthSlice { month, days }
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days with at least one event.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn to_snapshot(&self) -> Snapshot {
        let days = self
            .days
            .iter()
            .map(|(date, events)| (date.to_string(), events.iter().map(EventRecord::to_data).collect()))
            .collect();
        Snapshot::from_days(days)
    }

    /// Hydrate from a snapshot, keeping every row that passes validation.
    ///
    /// Rows under a malformed date key, rows that fail validation, and rows
    /// overlapping an earlier row of the same day are dropped with a warning.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for (key, rows) in snapshot.into_days() {
            let date = match DateKey::parse(&key) {
                Ok(date) => date,
                Err(e) => {
                    warn!(key = %key, error = %e, "dropping snapshot day");
                    continue;
                }
            };
            for data in rows {
                let name = data.name.clone();
                if let Err(e) = store.add(date, data) {
                    warn!(%date, name = %name, error = %e, "dropping snapshot event");
                }
            }
        }
        store
    }
}

/// The days of one calendar month and their events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSlice {
    month: MonthKey,
    days: BTreeMap<DateKey, Vec<EventRecord>>,
}

impl MonthSlice {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            days: BTreeMap::new(),
        }
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Days ascending, each with events in insertion order.
    pub fn days(&self) -> impl Iterator<Item = (DateKey, &[EventRecord])> + '_ {
        self.days.iter().map(|(date, events)| (*date, events.as_slice()))
    }

    pub fn get(&self, date: DateKey) -> &[EventRecord] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Keep only events matching `keep`, dropping days left empty.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&EventRecord) -> bool,
    {
        self.days.retain(|_, events| {
            events.retain(&mut keep);
            !events.is_empty()
        });
    }
}

impl Serialize for MonthSlice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, events) in &self.days {
            map.serialize_entry(&date.to_string(), events)?;
        }
        map.end()
    }
}
