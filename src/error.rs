//! Error types for lab-records
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// lab-records error types
#[derive(Error, Debug)]
pub enum Error {
    /// No live record carries the requested id
    #[error("Experiment {0} not found")]
    NotFound(u64),

    /// Statistics requested for a record without data points
    #[error("Experiment {0} has no measurements\nAdd at least one data point before computing statistics")]
    EmptyMeasurements(u64),

    /// Checksum sidecar missing or not matching the data file
    #[error("Integrity check failed for {}: {reason}\nThe file may be corrupted; the in-memory records were left unchanged", path.display())]
    Integrity {
        /// Data file that failed verification
        path: PathBuf,
        /// What went wrong (missing sidecar, digest mismatch)
        reason: String,
    },

    /// Malformed or truncated binary payload
    #[error("Decode error: {0}")]
    Decode(String),

    /// Record value that cannot be represented on the wire
    #[error("Encode error: {0}\nNothing was written")]
    Encode(String),

    /// Data file does not exist
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Rejected caller input or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
