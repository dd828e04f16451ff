//! Integration tests for hydrating a store from hand-written snapshots.

use daybook_core::interval::format_minutes;
use daybook_core::{export, Category, DateKey, EventData, EventStore, MonthKey, Snapshot};
use proptest::prelude::*;

#[test]
fn test_overlapping_rows_keep_the_earlier_one() {
    let text = r#"{
      "2024-03-05": [
        {"name": "First", "startTime": "09:00", "endTime": "10:00", "description": "", "category": "Work"},
        {"name": "Clash", "startTime": "09:30", "endTime": "11:00", "description": "", "category": "Work"},
        {"name": "After", "startTime": "10:00", "endTime": "11:00", "description": "", "category": "Others"}
      ]
    }"#;
    let store = EventStore::from_snapshot(Snapshot::from_json(text).unwrap());
    let names: Vec<_> = store
        .query(DateKey::parse("2024-03-05").unwrap())
        .iter()
        .map(|e| e.name())
        .collect();
    assert_eq!(names, ["First", "After"]);
}

#[test]
fn test_invalid_rows_and_keys_are_dropped() {
    let text = r#"{
      "2024-3-5": [
        {"name": "Bad key", "startTime": "09:00", "endTime": "10:00"}
      ],
      "2024-03-06": [
        {"name": "", "startTime": "09:00", "endTime": "10:00"},
        {"name": "Backwards", "startTime": "11:00", "endTime": "10:00"},
        {"name": "Garbage time", "startTime": "nine", "endTime": "10:00"},
        {"name": "Kept", "startTime": "12:00", "endTime": "13:00"}
      ],
      "2024-03-07": []
    }"#;
    let store = EventStore::from_snapshot(Snapshot::from_json(text).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.day_count(), 1);
    let (date, events) = store.all_entries().next().unwrap();
    assert_eq!(date.to_string(), "2024-03-06");
    assert_eq!(events[0].name(), "Kept");
}

#[test]
fn test_snapshot_json_roundtrip_is_stable() {
    let text = r#"{
      "2024-01-02": [
        {"name": "B", "startTime": "13:00", "endTime": "14:00", "description": "two", "category": "Personal"},
        {"name": "A", "startTime": "08:00", "endTime": "09:00", "description": "one", "category": "Work"}
      ],
      "2023-12-31": [
        {"name": "NYE", "startTime": "20:00", "endTime": "23:59", "description": "", "category": "Others"}
      ]
    }"#;
    let first = EventStore::from_snapshot(Snapshot::from_json(text).unwrap())
        .to_snapshot()
        .to_json()
        .unwrap();
    let second = EventStore::from_snapshot(Snapshot::from_json(&first).unwrap())
        .to_snapshot()
        .to_json()
        .unwrap();
    assert_eq!(first, second);
    assert!(first.find("2023-12-31").unwrap() < first.find("2024-01-02").unwrap());
}

fn row() -> impl Strategy<Value = (String, EventData)> {
    let date = (2023i32..=2025, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"));
    let times = (0u16..1439).prop_flat_map(|s| (Just(s), (s + 1)..=1439));
    let category = prop::sample::select(Category::ALL.to_vec());
    (
        date,
        "[A-Za-zé][A-Za-z ,\"é漢]{0,8}",
        times,
        "[a-z ,\"'éü漢\\\\\\n]{0,12}",
        category,
    )
        .prop_map(|(date, name, (start, end), description, category)| {
            let data = EventData::new(name, format_minutes(start), format_minutes(end))
                .with_description(description)
                .with_category(category);
            (date, data)
        })
}

proptest! {
    #[test]
    fn test_exported_json_is_a_fixed_point(rows in prop::collection::vec(row(), 0..40)) {
        let mut store = EventStore::new();
        for (date, data) in rows {
            // Overlapping rows are simply rejected
            let _ = store.add(DateKey::parse(&date).unwrap(), data);
        }

        let saved = store.to_snapshot().to_json().unwrap();
        let reloaded = EventStore::from_snapshot(Snapshot::from_json(&saved).unwrap());
        prop_assert_eq!(reloaded.len(), store.len());
        prop_assert_eq!(&reloaded.to_snapshot().to_json().unwrap(), &saved);

        let months: Vec<MonthKey> = store.all_entries().map(|(date, _)| date.month_key()).collect();
        for month in months {
            let first = export::to_json(&store.month_slice(month)).unwrap();
            let hydrated = EventStore::from_snapshot(Snapshot::from_json(&first).unwrap());
            let second = export::to_json(&hydrated.month_slice(month)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
