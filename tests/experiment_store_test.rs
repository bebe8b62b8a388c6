//! Record store and statistics tests

use chrono::NaiveDate;
use lab_records::experiment::{ExperimentRecord, RecordStore};
use lab_records::Error;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Identifier assignment
// =============================================================================

#[test]
fn test_first_id_is_one() {
    let mut store = RecordStore::new();
    assert_eq!(store.add("PCR Trial", date(2024, 1, 10), "Dr. Lee", vec![10, 12, 11]), 1);
}

#[test]
fn test_ids_strictly_increase_across_deletes() {
    let mut store = RecordStore::new();
    let mut issued = Vec::new();

    for i in 0..10 {
        let id = store.add(format!("run {i}"), date(2024, 1, 1), "r", vec![i]);
        issued.push(id);
        if i % 3 == 0 {
            store.delete(id);
        }
    }

    assert!(issued.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(store.len(), 6);
}

#[test]
fn test_delete_everything_then_add() {
    let mut store = RecordStore::new();
    let a = store.add("a", date(2024, 1, 1), "r", vec![]);
    store.delete(a);
    assert!(store.is_empty());
    assert_eq!(store.add("b", date(2024, 1, 1), "r", vec![]), 2);
}

// =============================================================================
// Update / delete
// =============================================================================

#[test]
fn test_update_then_delete_missing_leaves_record() {
    let mut store = RecordStore::new();
    let id = store.add("PCR Trial", date(2024, 1, 10), "Dr. Lee", vec![10, 12, 11]);

    assert!(store.update(id, "PCR Trial v2", date(2024, 1, 11), "Dr. Lee", vec![20, 22]));
    assert!(!store.delete(2));

    let expected = ExperimentRecord::new(1, "PCR Trial v2", date(2024, 1, 11), "Dr. Lee", vec![20, 22]);
    assert_eq!(store.list(), &[expected]);
}

#[test]
fn test_update_keeps_position() {
    let mut store = RecordStore::new();
    store.add("a", date(2024, 1, 1), "r", vec![]);
    store.add("b", date(2024, 1, 1), "r", vec![]);
    store.add("c", date(2024, 1, 1), "r", vec![]);

    store.update(2, "B", date(2024, 2, 2), "q", vec![1]);

    let names: Vec<&str> = store.list().iter().map(ExperimentRecord::name).collect();
    assert_eq!(names, ["a", "B", "c"]);
}

#[test]
fn test_strict_variants() {
    let mut store = RecordStore::new();
    let id = store.add("a", date(2024, 1, 1), "r", vec![]);

    store.try_update(id, "a2", date(2024, 1, 1), "r", vec![1]).unwrap();
    store.try_delete(id).unwrap();
    assert!(matches!(store.try_delete(id), Err(Error::NotFound(1))));
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn test_statistics_example() {
    let mut store = RecordStore::new();
    let id = store.add("PCR Trial", date(2024, 1, 10), "Dr. Lee", vec![10, 12, 11]);

    let stats = store.statistics(id).unwrap();
    assert!((stats.mean() - 11.0).abs() < 1e-9);
    assert!((stats.median() - 11.0).abs() < 1e-9);
    assert!((stats.std_dev() - 1.0).abs() < 1e-9);
}

#[test]
fn test_statistics_single_measurement() {
    let mut store = RecordStore::new();
    let id = store.add("single", date(2024, 1, 10), "r", vec![5]);

    let stats = store.statistics(id).unwrap();
    assert_eq!(stats.std_dev(), 0.0);
    assert!((stats.mean() - 5.0).abs() < f64::EPSILON);
    assert!((stats.median() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_statistics_empty_measurements() {
    let mut store = RecordStore::new();
    let id = store.add("empty", date(2024, 1, 10), "r", vec![]);

    assert!(matches!(store.statistics(id), Err(Error::EmptyMeasurements(_))));
}

#[test]
fn test_statistics_missing_record() {
    let store = RecordStore::new();
    assert!(matches!(store.statistics(1), Err(Error::NotFound(1))));
}

#[test]
fn test_statistics_follow_update() {
    let mut store = RecordStore::new();
    let id = store.add("a", date(2024, 1, 1), "r", vec![]);
    store.update(id, "a", date(2024, 1, 1), "r", vec![1, 2, 3, 4]);

    let stats = store.statistics(id).unwrap();
    assert!((stats.median() - 2.5).abs() < 1e-9);
}
