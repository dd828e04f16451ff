//! Caller-facing facade over the event store.
//!
//! A [`Planner`] owns an [`EventStore`] and a [`PersistenceAdapter`]. It
//! loads once when opened and saves after every accepted mutation. Rejected
//! mutations never trigger a save.
//!
//! Persistence failures do not undo in-memory changes. A failed load leaves
//! the planner empty and is kept in [`Planner::load_error`]; a failed save
//! is reported in the returned [`Committed`].
//!
//! After a failed load the planner is in-memory only. It never saves, so the
//! unreadable snapshot is left exactly as it was.

use tracing::warn;

use crate::date_key::{DateKey, MonthKey};
use crate::error::{PersistenceError, Result};
use crate::event::{EventData, EventId, EventRecord};
use crate::export::{self, Export, ExportFormat};
use crate::filter;
use crate::persistence::PersistenceAdapter;
use crate::store::{EventStore, MonthSlice};

/// Result of an accepted mutation.
#[derive(Debug)]
#[must_use]
pub struct Committed<T> {
    pub value: T,
    /// Set when the in-memory change could not be saved.
    pub save_error: Option<PersistenceError>,
}

impl<T> Committed<T> {
    pub fn persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

pub struct Planner<A: PersistenceAdapter> {
    store: EventStore,
    adapter: A,
    load_error: Option<PersistenceError>,
}

impl<A: PersistenceAdapter> Planner<A> {
    /// Hydrate from `adapter`, falling back to an empty store on failure.
    pub fn open(adapter: A) -> Self {
        let (store, load_error) = match adapter.load() {
            Ok(snapshot) => (EventStore::from_snapshot(snapshot), None),
            Err(e) => {
                warn!(error = %e, "snapshot unavailable, starting empty");
                (EventStore::new(), Some(e))
            }
        };
        Self {
            store,
            adapter,
            load_error,
        }
    }

    pub fn load_error(&self) -> Option<&PersistenceError> {
        self.load_error.as_ref()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn add_event(&mut self, date: DateKey, data: EventData) -> Result<Committed<EventId>> {
        let id = self.store.add(date, data)?;
        Ok(self.commit(id))
    }

    /// Delete by position in the day's current sequence.
    pub fn delete_event(&mut self, date: DateKey, index: usize) -> Result<Committed<EventRecord>> {
        let removed = self.store.delete(date, index)?;
        Ok(self.commit(removed))
    }

    pub fn delete_event_by_id(&mut self, date: DateKey, id: EventId) -> Result<Committed<EventRecord>> {
        let removed = self.store.delete_by_id(date, id)?;
        Ok(self.commit(removed))
    }

    pub fn query_day(&self, date: DateKey) -> &[EventRecord] {
        self.store.query(date)
    }

    pub fn query_month(&self, month: MonthKey) -> MonthSlice {
        self.store.month_slice(month)
    }

    /// A day's events narrowed to `keyword`.
    pub fn filter_keyword<'a>(
        &'a self,
        date: DateKey,
        keyword: &str,
    ) -> impl Iterator<Item = &'a EventRecord> + Clone + 'a {
        filter::apply(self.store.query(date), keyword)
    }

    pub fn all_entries(&self) -> impl Iterator<Item = (DateKey, &[EventRecord])> + '_ {
        self.store.all_entries()
    }

    pub fn export_month(&self, month: MonthKey, format: ExportFormat) -> Result<Export> {
        export::export(&self.store.month_slice(month), format)
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        let saved = match &self.load_error {
            Some(e) => Err(PersistenceError::NotLoaded(e.to_string())),
            None => self.adapter.save(&self.store.to_snapshot()),
        };
        let save_error = saved.err();
        if let Some(e) = &save_error {
            warn!(error = %e, "snapshot not saved, keeping changes in memory");
        }
        Committed { value, save_error }
    }
}
