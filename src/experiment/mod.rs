//! Experiment Records (in-memory side)
//!
//! This module provides the record type, the ordered record store the
//! persistence layer reads and replaces, and measurement statistics.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lab_records::experiment::RecordStore;
//!
//! let mut store = RecordStore::new();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//!
//! let id = store.add("PCR Trial", date, "Dr. Lee", vec![10, 12, 11]);
//! store.update(id, "PCR Trial v2", date, "Dr. Lee", vec![20, 22]);
//! store.delete(2); // no such record, nothing happens
//!
//! assert_eq!(store.list().len(), 1);
//! assert_eq!(store.list()[0].name(), "PCR Trial v2");
//! ```

mod experiment_record;
mod statistics;
mod store;

pub use experiment_record::{ExperimentRecord, DATE_FORMAT};
pub use statistics::Statistics;
pub use store::RecordStore;
