//! Logging setup for binaries embedding lab-records
//!
//! The library only emits `tracing` events; a front end calls [`init`] once
//! at startup to print them. `RUST_LOG` overrides the default
//! `lab_records=info` filter.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "lab_records=info";

/// Initialize the global tracing subscriber, writing to stderr.
///
/// Later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
