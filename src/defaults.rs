//! Default values for manifest-verify.
//!
//! This module provides centralized default values used by the engine and the
//! CLI, ensuring both agree on them.

use std::path::PathBuf;
use std::time::Duration;

/// Seconds each remote query may take before it is reported as a timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of projects checked concurrently. One keeps checks sequential.
pub const DEFAULT_JOBS: usize = 1;

/// Upper bound for `--jobs`, to avoid exhausting outbound connections.
pub const MAX_JOBS: usize = 64;

/// Where `repo` keeps the local manifest inside a checkout.
pub const DEFAULT_MANIFEST_PATH: &str = ".repo/local_manifests/local_manifest.xml";

/// Returns the default per-check timeout.
pub fn check_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

/// Returns the default manifest location, relative to the working directory.
///
/// This can be overridden by the `--manifest` CLI flag or the
/// `MANIFEST_VERIFY_MANIFEST` environment variable.
pub fn manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_PATH)
}
