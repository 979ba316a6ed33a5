//! Process exit codes used by the `manifest-verify` binary.
//!
//! - `0`: every project is accessible (or the manifest has none)
//! - `1`: at least one project failed, or the manifest could not be loaded
//! - `2`: invalid command-line usage (reported by clap)

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const USAGE: i32 = 2;
