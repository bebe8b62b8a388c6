//! Persistence: checksummed Avro-binary data files
//!
//! A save writes two files:
//!
//! ```text
//! experiment_data.avro         records, Avro binary, concatenated, no header
//! experiment_data.avro.sha256  lowercase hex SHA-256 of the file above
//! ```
//!
//! A load verifies the sidecar before decoding anything and only touches
//! the [`RecordStore`] once every record decoded cleanly, so a failed load
//! leaves the in-memory data exactly as it was.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use lab_records::experiment::RecordStore;
//! use lab_records::persistence::PersistenceCodec;
//!
//! let mut store = RecordStore::new();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! store.add("PCR Trial", date, "Dr. Lee", vec![10, 12, 11]);
//!
//! let codec = PersistenceCodec::default();
//! codec.save(&store, "experiment_data.avro")?;
//!
//! let mut restored = RecordStore::new();
//! codec.load(&mut restored, "experiment_data.avro")?;
//! assert_eq!(restored.list(), store.list());
//! # Ok::<(), lab_records::Error>(())
//! ```

pub mod checksum;
pub mod codec;
pub mod schema;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::PersistenceConfig;
use crate::experiment::RecordStore;
use crate::{Error, Result};

pub use codec::{decode_records, encode_records};
pub use schema::EXPERIMENT_SCHEMA_JSON;

/// Saves and loads a [`RecordStore`] guarded by a checksum sidecar.
#[derive(Debug, Clone, Default)]
pub struct PersistenceCodec {
    config: PersistenceConfig,
}

impl PersistenceCodec {
    /// Create a codec with the given config.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the config fails validation
    pub fn new(config: PersistenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the active config.
    #[must_use]
    pub const fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Encode every record in `store` to `path`, then write the sidecar.
    ///
    /// Encoding happens before any file is touched, so a record that cannot
    /// be encoded leaves the previous data file and sidecar in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::Encode` if a record cannot be represented on the wire,
    /// and `Error::Io` if the data file or sidecar cannot be written
    pub fn save(&self, store: &RecordStore, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode_records(store.list())?;
        debug!(
            path = %path.display(),
            records = store.len(),
            bytes = bytes.len(),
            "encoded experiment records"
        );

        self.write_file(path, &bytes)?;

        let digest = checksum::sha256_hex(&bytes);
        let sidecar = checksum::sidecar_path(path, self.config.checksum_suffix());
        self.write_file(&sidecar, digest.as_bytes())?;

        info!(path = %path.display(), records = store.len(), %digest, "experiment data saved");
        Ok(())
    }

    /// Verify, decode and swap in the records stored at `path`.
    ///
    /// Returns the number of records loaded. On any error `store` is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `Error::FileNotFound` if `path` does not exist
    /// - `Error::Integrity` if the sidecar is missing or does not match
    /// - `Error::Decode` if the payload is malformed or truncated
    /// - `Error::Io` for other read failures
    pub fn load(&self, store: &mut RecordStore, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = read_data_file(path)?;
        checksum::verify(path, &bytes, self.config.checksum_suffix())?;

        let records = decode_records(&bytes)?;
        let count = records.len();
        store.replace(records);

        info!(path = %path.display(), records = count, next_id = store.next_id(), "experiment data loaded");
        Ok(count)
    }

    /// Check the sidecar for `path` without decoding or loading anything.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus `Error::Decode`
    pub fn verify(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = read_data_file(path)?;
        checksum::verify(path, &bytes, self.config.checksum_suffix())
    }

    /// [`save`](Self::save) to the configured data path.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save)
    pub fn save_default(&self, store: &RecordStore) -> Result<()> {
        self.save(store, self.config.data_path())
    }

    /// [`load`](Self::load) from the configured data path.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load)
    pub fn load_default(&self, store: &mut RecordStore) -> Result<usize> {
        self.load(store, self.config.data_path())
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if !self.config.atomic_writes() {
            fs::write(path, bytes)?;
            return Ok(());
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

fn read_data_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}
