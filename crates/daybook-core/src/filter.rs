//! Keyword filtering over event names and descriptions.

use crate::event::EventRecord;
use crate::store::MonthSlice;

/// Case-insensitive substring match on `record`'s name or description.
///
/// An empty keyword matches every record.
pub fn matches(record: &EventRecord, keyword: &str) -> bool {
    KeywordFilter::new(keyword).matches(record)
}

/// Lazily filter a day's events by `keyword`.
///
/// The returned iterator is `Clone`, so a consumer can restart it.
pub fn apply<'a>(
    events: &'a [EventRecord],
    keyword: &str,
) -> impl Iterator<Item = &'a EventRecord> + Clone + 'a {
    let filter = KeywordFilter::new(keyword);
    events.iter().filter(move |e| filter.matches(e))
}

/// A keyword lowercased once and reused across many records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    needle: String,
}

impl KeywordFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &EventRecord) -> bool {
        self.is_empty()
            || record.name().to_lowercase().contains(&self.needle)
            || record.description().to_lowercase().contains(&self.needle)
    }

    /// Restrict a month slice to matching events, dropping empty days.
    pub fn apply_month(&self, mut slice: MonthSlice) -> MonthSlice {
        if !self.is_empty() {
            slice.retain(|e| self.matches(e));
        }
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::{DateKey, MonthKey};
    use crate::event::EventData;
    use crate::store::EventStore;

    fn record(name: &str, description: &str) -> EventRecord {
        EventRecord::from_data(EventData::new(name, "09:00", "10:00").with_description(description)).unwrap()
    }

    #[test]
    fn empty_keyword_matches_everything() {
        assert!(matches(&record("Standup", ""), ""));
        assert!(matches(&record("Lunch", "with team"), ""));
        assert!(matches(&record("Gym", "legs"), ""));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(matches(&record("Standup", ""), "STAND"));
        assert!(matches(&record("standup", ""), "Stand"));
        assert!(!matches(&record("Standup", ""), "sit"));
    }

    #[test]
    fn description_is_searched() {
        assert!(matches(&record("Meeting", "Quarterly budget review"), "budget"));
        assert!(!matches(&record("Meeting", "Quarterly budget review"), "payroll"));
    }

    #[test]
    fn apply_is_lazy_and_restartable() {
        let events = vec![record("Standup", ""), record("Lunch", "with team"), record("Team sync", "")];
        let iter = apply(&events, "team");
        let first: Vec<_> = iter.clone().map(EventRecord::name).collect();
        let second: Vec<_> = iter.map(EventRecord::name).collect();
        assert_eq!(first, ["Lunch", "Team sync"]);
        assert_eq!(first, second);
    }

    #[test]
    fn apply_month_drops_days_without_matches() {
        let mut store = EventStore::new();
        let a = DateKey::parse("2024-03-01").unwrap();
        let b = DateKey::parse("2024-03-02").unwrap();
        store.add(a, EventData::new("Dentist", "09:00", "10:00")).unwrap();
        store.add(b, EventData::new("Standup", "09:00", "09:15")).unwrap();

        let slice = KeywordFilter::new("stand").apply_month(store.month_slice(MonthKey::new(2024, 3)));
        assert_eq!(slice.days().map(|(d, _)| d).collect::<Vec<_>>(), [b]);
    }
}
