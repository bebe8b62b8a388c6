//! # lab-records: Laboratory Experiment Records with Checksummed Persistence
//!
//! **Version**: 0.1.0
//!
//! lab-records keeps laboratory experiment entries (name, date, researcher,
//! integer measurements) in memory, computes summary statistics, and
//! persists the entries as Avro-binary records guarded by a SHA-256
//! sidecar file.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Jidoka**: Load stops at the first integrity or decode failure
//! - **Poka-Yoke**: A failed load never half-replaces in-memory records
//! - **Genchi Genbutsu**: Fixed wire schema shared with every reader
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lab_records::experiment::RecordStore;
//! use lab_records::input::parse_date;
//! use lab_records::persistence::PersistenceCodec;
//!
//! let mut store = RecordStore::new();
//! let id = store.add("PCR Trial", parse_date("2024-01-10")?, "Dr. Lee", vec![10, 12, 11]);
//! println!("{}", store.statistics(id)?);
//!
//! PersistenceCodec::default().save_default(&store)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod input;
pub mod logging;
pub mod persistence;

pub use error::{Error, Result};
