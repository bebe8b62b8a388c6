//! SHA-256 checksum sidecar
//!
//! The sidecar holds the lowercase hex digest of the data file's raw bytes
//! and is rewritten in full on every save.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{Error, Result};

/// Lowercase hex SHA-256 of `bytes` (64 characters).
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Path of the sidecar for `data_path`: the data path with `suffix` appended.
#[must_use]
pub fn sidecar_path(data_path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = data_path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

/// Check `bytes` (the contents of `data_path`) against its sidecar.
///
/// # Errors
///
/// Returns `Error::Integrity` if the sidecar is missing, is not text or holds
/// a different digest, and `Error::Io` if the sidecar exists but cannot be read
pub fn verify(data_path: &Path, bytes: &[u8], suffix: &str) -> Result<()> {
    let sidecar = sidecar_path(data_path, suffix);
    let raw = match fs::read(&sidecar) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %data_path.display(), "checksum sidecar missing");
            return Err(Error::Integrity {
                path: data_path.to_path_buf(),
                reason: format!("checksum file {} is missing", sidecar.display()),
            });
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let computed = sha256_hex(bytes);
    let Ok(stored) = std::str::from_utf8(&raw) else {
        warn!(path = %data_path.display(), %computed, "checksum sidecar is not text");
        return Err(Error::Integrity {
            path: data_path.to_path_buf(),
            reason: format!("checksum mismatch ({} is not a hex digest)", sidecar.display()),
        });
    };
    let stored = stored.trim();
    if stored.eq_ignore_ascii_case(&computed) {
        Ok(())
    } else {
        warn!(path = %data_path.display(), %computed, %stored, "checksum mismatch");
        Err(Error::Integrity {
            path: data_path.to_path_buf(),
            reason: format!("checksum mismatch (expected {stored}, computed {computed})"),
        })
    }
}
