//! Parsing of user-entered record fields
//!
//! Front ends collect raw text (a `YYYY-MM-DD` date, comma-separated data
//! points) and turn it into typed values here before calling into
//! [`RecordStore`].

use chrono::{Datelike, NaiveDate};

use crate::experiment::{RecordStore, DATE_FORMAT};
use crate::persistence::schema::{MAX_DATE_YEAR, MIN_DATE_YEAR};
use crate::{Error, Result};

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the text is not a valid calendar date
/// with a four-digit year
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("date {input:?} is not YYYY-MM-DD: {e}")))?;
    if !(MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&date.year()) {
        return Err(Error::InvalidInput(format!(
            "date {input:?} is outside years {MIN_DATE_YEAR:04}-{MAX_DATE_YEAR}"
        )));
    }
    Ok(date)
}

/// Parse comma-separated integers, e.g. `"10, 12,11"`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for blank input or any item that is not an
/// integer in `i32` range
pub fn parse_measurements(input: &str) -> Result<Vec<i32>> {
    if input.trim().is_empty() {
        return Err(Error::InvalidInput("no data points given".to_string()));
    }
    input
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<i32>()
                .map_err(|e| Error::InvalidInput(format!("data point {item:?}: {e}")))
        })
        .collect()
}

/// Validated field values for an add or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Experiment name (non-empty)
    pub name: String,
    /// Experiment date
    pub date: NaiveDate,
    /// Researcher
    pub researcher: String,
    /// Data points
    pub measurements: Vec<i32>,
}

impl RecordDraft {
    /// Parse raw form fields into a draft.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty name, a bad date or bad
    /// data points
    pub fn parse(name: &str, date: &str, researcher: &str, data_points: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("experiment name must not be empty".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            date: parse_date(date)?,
            researcher: researcher.trim().to_string(),
            measurements: parse_measurements(data_points)?,
        })
    }

    /// Add the draft as a new record, returning its id.
    pub fn add_to(self, store: &mut RecordStore) -> u64 {
        store.add(self.name, self.date, self.researcher, self.measurements)
    }

    /// Overwrite record `id` with the draft. See [`RecordStore::update`].
    pub fn apply_to(self, store: &mut RecordStore, id: u64) -> bool {
        store.update(id, self.name, self.date, self.researcher, self.measurements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-01-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert!(matches!(parse_date("2024-02-30"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_date("10/01/2024"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_date("0000-06-01"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_date("9999-12-31"), Ok(_)));
    }

    #[test]
    fn test_parse_measurements() {
        assert_eq!(parse_measurements("10, 12,11").unwrap(), vec![10, 12, 11]);
        assert_eq!(parse_measurements("-3").unwrap(), vec![-3]);
        assert!(parse_measurements("").is_err());
        assert!(parse_measurements("1,,2").is_err());
        assert!(parse_measurements("1.5").is_err());
        assert!(parse_measurements("99999999999").is_err());
    }

    #[test]
    fn test_draft_rejects_blank_name() {
        let err = RecordDraft::parse("  ", "2024-01-10", "r", "1").unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn test_draft_add_and_apply() {
        let mut store = RecordStore::new();
        let id = RecordDraft::parse("PCR Trial", "2024-01-10", "Dr. Lee", "10,12,11")
            .unwrap()
            .add_to(&mut store);
        assert_eq!(id, 1);

        let updated = RecordDraft::parse("PCR Trial v2", "2024-01-11", "Dr. Lee", "20,22")
            .unwrap()
            .apply_to(&mut store, id);
        assert!(updated);
        assert_eq!(store.get(id).unwrap().measurements(), &[20, 22]);
    }
}
