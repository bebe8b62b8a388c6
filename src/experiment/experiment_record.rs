//! Experiment Record - one laboratory entry

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used on the wire and for display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Experiment Record represents a single laboratory entry.
///
/// The `id` is assigned by [`RecordStore`](super::RecordStore) and never
/// changes; every other field can be overwritten through
/// [`RecordStore::update`](super::RecordStore::update).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentRecord {
    id: u64,
    name: String,
    date: NaiveDate,
    researcher: String,
    measurements: Vec<i32>,
}

impl ExperimentRecord {
    /// Create a new experiment record.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier (positive)
    /// * `name` - Experiment name
    /// * `date` - Calendar date the experiment ran
    /// * `researcher` - Who ran it
    /// * `measurements` - Integer data points, possibly empty
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        date: NaiveDate,
        researcher: impl Into<String>,
        measurements: Vec<i32>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            researcher: researcher.into(),
            measurements,
        }
    }

    /// Get the record ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the experiment date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the researcher name.
    #[must_use]
    pub fn researcher(&self) -> &str {
        &self.researcher
    }

    /// Get the measurements in recorded order.
    #[must_use]
    pub fn measurements(&self) -> &[i32] {
        &self.measurements
    }

    /// Overwrite every mutable field, keeping the id.
    pub(crate) fn overwrite(
        &mut self,
        name: String,
        date: NaiveDate,
        researcher: String,
        measurements: Vec<i32>,
    ) {
        self.name = name;
        self.date = date;
        self.researcher = researcher;
        self.measurements = measurements;
    }
}

impl fmt::Display for ExperimentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | [",
            self.id,
            self.name,
            self.date.format(DATE_FORMAT),
            self.researcher
        )?;
        for (i, value) in self.measurements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_experiment_record_new() {
        let record = ExperimentRecord::new(1, "PCR Trial", jan_10(), "Dr. Lee", vec![10, 12, 11]);
        assert_eq!(record.id(), 1);
        assert_eq!(record.name(), "PCR Trial");
        assert_eq!(record.date(), jan_10());
        assert_eq!(record.researcher(), "Dr. Lee");
        assert_eq!(record.measurements(), &[10, 12, 11]);
    }

    #[test]
    fn test_display_format() {
        let record = ExperimentRecord::new(1, "PCR Trial", jan_10(), "Dr. Lee", vec![10, 12, 11]);
        assert_eq!(record.to_string(), "1 | PCR Trial | 2024-01-10 | Dr. Lee | [10, 12, 11]");

        let empty = ExperimentRecord::new(2, "Dry run", jan_10(), "Dr. Lee", vec![]);
        assert_eq!(empty.to_string(), "2 | Dry run | 2024-01-10 | Dr. Lee | []");
    }
}
