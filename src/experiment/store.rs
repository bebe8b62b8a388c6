//! Record Store - in-memory storage for experiment records
//!
//! This module provides the ordered, mutable collection that the
//! persistence layer reads from on save and replaces on load.

use chrono::NaiveDate;
use tracing::debug;

use super::{ExperimentRecord, Statistics};
use crate::{Error, Result};

/// In-memory store for experiment records.
///
/// ## Design
///
/// Records live in a vector so iteration follows insertion order. Ids come
/// from a monotonically increasing counter that starts at 1 and is never
/// rewound: deleting a record or replacing the contents does not make an
/// already-issued id available again.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<ExperimentRecord>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordStore {
    /// Create a new empty record store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Get the id the next `add` will assign.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Add a record and return its newly assigned id.
    ///
    /// Empty `measurements` are accepted; [`statistics`](Self::statistics)
    /// rejects them later.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        date: NaiveDate,
        researcher: impl Into<String>,
        measurements: Vec<i32>,
    ) -> u64 {
        let id = self.next_id;
        self.records
            .push(ExperimentRecord::new(id, name, date, researcher, measurements));
        self.next_id += 1;
        debug!(id, "experiment added");
        id
    }

    /// Overwrite the fields of the record with `id`.
    ///
    /// Silently does nothing when no such record exists (the record may have
    /// been deleted between selection and update). Returns whether a record
    /// was changed; use [`try_update`](Self::try_update) to get `NotFound`.
    pub fn update(
        &mut self,
        id: u64,
        name: impl Into<String>,
        date: NaiveDate,
        researcher: impl Into<String>,
        measurements: Vec<i32>,
    ) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.overwrite(name.into(), date, researcher.into(), measurements);
                debug!(id, "experiment updated");
                true
            }
            None => {
                debug!(id, "update ignored, experiment not found");
                false
            }
        }
    }

    /// Like [`update`](Self::update) but fails when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no record has `id`
    pub fn try_update(
        &mut self,
        id: u64,
        name: impl Into<String>,
        date: NaiveDate,
        researcher: impl Into<String>,
        measurements: Vec<i32>,
    ) -> Result<()> {
        if self.update(id, name, date, researcher, measurements) {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }

    /// Remove the record with `id`. No-op when absent.
    ///
    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        debug!(id, removed, "experiment delete");
        removed
    }

    /// Like [`delete`](Self::delete) but fails when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no record has `id`
    pub fn try_delete(&mut self, id: u64) -> Result<()> {
        if self.delete(id) {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }

    /// Get all records in storage order.
    #[must_use]
    pub fn list(&self) -> &[ExperimentRecord] {
        &self.records
    }

    /// Get a record by ID.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ExperimentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Compute mean, sample standard deviation and median for a record.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use lab_records::experiment::RecordStore;
    ///
    /// let mut store = RecordStore::new();
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    /// let id = store.add("PCR Trial", date, "Dr. Lee", vec![10, 12, 11]);
    ///
    /// let stats = store.statistics(id)?;
    /// assert!((stats.mean() - 11.0).abs() < 1e-9);
    /// assert!((stats.median() - 11.0).abs() < 1e-9);
    /// # Ok::<(), lab_records::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no record has `id`, and
    /// `Error::EmptyMeasurements` if the record has no data points
    pub fn statistics(&self, id: u64) -> Result<Statistics> {
        let record = self.get(id).ok_or(Error::NotFound(id))?;
        Statistics::from_measurements(record.measurements()).ok_or(Error::EmptyMeasurements(id))
    }

    /// Replace the entire contents with `records`, in the given order.
    ///
    /// `next_id` becomes one past the largest id seen, but never moves
    /// backwards. Callers are responsible for id uniqueness; the decoder
    /// rejects duplicate ids before calling this.
    pub fn replace(&mut self, records: Vec<ExperimentRecord>) {
        let max_id = records.iter().map(ExperimentRecord::id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.records = records;
        debug!(count = self.records.len(), next_id = self.next_id, "store contents replaced");
    }
}
