//! Persistence configuration
//!
//! Defaults match the file layout the lab tool has always used:
//! `experiment_data.avro` next to `experiment_data.avro.sha256`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default data file name.
pub const DEFAULT_DATA_PATH: &str = "experiment_data.avro";

/// Default checksum sidecar suffix.
pub const DEFAULT_CHECKSUM_SUFFIX: &str = ".sha256";

/// Settings for [`PersistenceCodec`](crate::persistence::PersistenceCodec).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PersistenceConfig {
    data_path: PathBuf,
    checksum_suffix: String,
    atomic_writes: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            checksum_suffix: DEFAULT_CHECKSUM_SUFFIX.to_string(),
            atomic_writes: true,
        }
    }
}

impl PersistenceConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> PersistenceConfigBuilder {
        PersistenceConfigBuilder::default()
    }

    /// Parse a JSON config; missing keys take their defaults.
    ///
    /// ```rust
    /// use lab_records::config::PersistenceConfig;
    ///
    /// let config = PersistenceConfig::from_json_str(r#"{"atomic_writes": false}"#)?;
    /// assert!(!config.atomic_writes());
    /// assert_eq!(config.checksum_suffix(), ".sha256");
    /// # Ok::<(), lab_records::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the JSON is malformed or the
    /// resulting config fails [`validate`](Self::validate)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("invalid persistence config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty data path or a checksum
    /// suffix that is empty or does not start with `.`
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("data_path must not be empty".to_string()));
        }
        if self.checksum_suffix.len() < 2 || !self.checksum_suffix.starts_with('.') {
            return Err(Error::InvalidInput(format!(
                "checksum_suffix must look like \".ext\", got {:?}",
                self.checksum_suffix
            )));
        }
        Ok(())
    }

    /// Get the default data file path.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Get the sidecar suffix.
    #[must_use]
    pub fn checksum_suffix(&self) -> &str {
        &self.checksum_suffix
    }

    /// Whether data and sidecar are written via temp file + rename.
    #[must_use]
    pub const fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }
}

/// Builder for `PersistenceConfig`.
#[derive(Debug, Default)]
pub struct PersistenceConfigBuilder {
    config: PersistenceConfig,
}

impl PersistenceConfigBuilder {
    /// Set the default data file path.
    #[must_use]
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the sidecar suffix (including the leading dot).
    #[must_use]
    pub fn checksum_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.checksum_suffix = suffix.into();
        self
    }

    /// Enable or disable temp-file + rename writes.
    #[must_use]
    pub const fn atomic_writes(mut self, enabled: bool) -> Self {
        self.config.atomic_writes = enabled;
        self
    }

    /// Build and validate the `PersistenceConfig`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if validation fails
    pub fn build(self) -> Result<PersistenceConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
