//! Property-based tests for lab-records
//!
//! Following ruchy/trueno/aprender pattern:
//! - Test mathematical invariants
//! - Test data integrity properties
//! - Run with ProptestConfig::with_cases(100)
//! - Must complete in <30 seconds for pre-commit hook

use chrono::NaiveDate;
use lab_records::experiment::{ExperimentRecord, RecordStore, Statistics};
use lab_records::persistence::codec::{Decoder, Encoder};
use lab_records::persistence::{decode_records, encode_records, PersistenceCodec};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a calendar date in the four-digit year range
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Generate (name, date, researcher, measurements) field tuples
fn arb_fields() -> impl Strategy<Value = (String, NaiveDate, String, Vec<i32>)> {
    (
        "[a-zA-Z0-9 µñ-]{1,24}",
        arb_date(),
        ".{0,16}",
        proptest::collection::vec(any::<i32>(), 0..20),
    )
}

/// Generate a store built through `add`, with some records deleted
fn arb_store() -> impl Strategy<Value = RecordStore> {
    (
        proptest::collection::vec(arb_fields(), 0..12),
        proptest::collection::vec(any::<bool>(), 12),
    )
        .prop_map(|(fields, deletes)| {
            let mut store = RecordStore::new();
            for (name, date, researcher, measurements) in fields {
                store.add(name, date, researcher, measurements);
            }
            for (i, delete) in deletes.into_iter().enumerate() {
                if delete {
                    store.delete(i as u64 + 1);
                }
            }
            store
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Identifier Properties
    // ========================================================================

    /// Property: ids from add are strictly increasing, even across deletes
    #[test]
    fn prop_ids_strictly_increasing(ops in proptest::collection::vec(any::<bool>(), 1..50)) {
        let mut store = RecordStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut last = 0;

        for delete_after in ops {
            let id = store.add("x", date, "r", vec![]);
            prop_assert!(id > last);
            last = id;
            if delete_after {
                store.delete(id);
            }
        }
    }

    /// Property: live ids are unique
    #[test]
    fn prop_live_ids_unique(store in arb_store()) {
        let mut ids: Vec<u64> = store.list().iter().map(ExperimentRecord::id).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
    }

    // ========================================================================
    // Codec Properties
    // ========================================================================

    /// Property: long values survive the zig-zag varint encoding
    #[test]
    fn prop_long_identity(value in any::<i64>()) {
        let mut encoder = Encoder::new();
        encoder.write_long(value);
        let bytes = encoder.into_bytes();
        prop_assert!(bytes.len() <= 10);

        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_long().unwrap(), value);
        prop_assert!(decoder.is_exhausted());
    }

    /// Property: decoding the encoded records gives the records back
    #[test]
    fn prop_records_decode_to_original(store in arb_store()) {
        let bytes = encode_records(store.list()).unwrap();
        let decoded = decode_records(&bytes).unwrap();
        prop_assert_eq!(decoded.as_slice(), store.list());
    }

    /// Property: every strict prefix of a non-empty encoding is rejected
    /// or decodes to fewer records
    #[test]
    fn prop_prefix_never_yields_all_records(store in arb_store(), cut in any::<prop::sample::Index>()) {
        let bytes = encode_records(store.list()).unwrap();
        prop_assume!(!bytes.is_empty());
        let cut = cut.index(bytes.len());

        if let Ok(records) = decode_records(&bytes[..cut]) {
            prop_assert!(records.len() < store.len());
        }
    }

    /// Property: save then load into a fresh store reproduces the records
    #[test]
    fn prop_save_load_round_trip(store in arb_store()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.avro");
        let codec = PersistenceCodec::default();

        codec.save(&store, &path).unwrap();
        let mut restored = RecordStore::new();
        codec.load(&mut restored, &path).unwrap();

        prop_assert_eq!(restored.list(), store.list());
        let max_id = store.list().iter().map(ExperimentRecord::id).max().unwrap_or(0);
        prop_assert_eq!(restored.next_id(), max_id + 1);
    }

    // ========================================================================
    // Statistics Properties
    // ========================================================================

    /// Property: mean and median lie within [min, max]
    #[test]
    fn prop_statistics_bounded(values in proptest::collection::vec(-1_000_000i32..1_000_000, 1..50)) {
        let stats = Statistics::from_measurements(&values).unwrap();
        let min = f64::from(*values.iter().min().unwrap());
        let max = f64::from(*values.iter().max().unwrap());

        prop_assert!(stats.mean() >= min - 1e-6 && stats.mean() <= max + 1e-6);
        prop_assert!(stats.median() >= min && stats.median() <= max);
        prop_assert!(stats.std_dev() >= 0.0);
    }

    /// Property: a constant series has zero spread
    #[test]
    fn prop_constant_series_zero_std_dev(value in any::<i32>(), n in 1usize..20) {
        let stats = Statistics::from_measurements(&vec![value; n]).unwrap();
        prop_assert!(stats.std_dev().abs() < 1e-6);
        prop_assert!((stats.median() - f64::from(value)).abs() < f64::EPSILON);
    }
}
