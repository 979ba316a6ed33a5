//! # Manifest Verify Library
//!
//! This library checks a repo-style manifest before a multi-repository
//! checkout: every declared project must point at a remote that exists, and
//! every pinned revision must exist upstream. It is designed to be used by the
//! `manifest-verify` command-line tool but the engine is usable on its own,
//! with any [`oracle::RemoteOracle`] implementation.
//!
//! ## Quick Example
//!
//! ```
//! use manifest_verify::engine::Verifier;
//! use manifest_verify::manifest;
//! use manifest_verify::oracle::RemoteOracle;
//! use manifest_verify::outcome::CheckOutcome;
//! use std::time::Duration;
//!
//! struct AlwaysThere;
//!
//! impl RemoteOracle for AlwaysThere {
//!     fn check(&self, _url: &str, _rev: Option<&str>, _timeout: Duration) -> CheckOutcome {
//!         CheckOutcome::Accessible
//!     }
//! }
//!
//! let manifest = manifest::parse(r#"
//!     <manifest>
//!       <remote name="aosp" fetch="android.googlesource.com" />
//!       <project name="platform/frameworks/base" remote="aosp" revision="main" />
//!       <project name="device/acme/widget" />
//!     </manifest>
//! "#).unwrap();
//!
//! let report = Verifier::with_oracle(Box::new(AlwaysThere)).run(&manifest);
//! assert_eq!(
//!     report.entries()[0].url.as_deref(),
//!     Some("https://android.googlesource.com/platform/frameworks/base.git")
//! );
//! assert_eq!(report.entries()[1].outcome, CheckOutcome::MissingRemoteField);
//! assert_eq!(report.exit_code(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: remotes and projects extracted from the XML.
//! - **Resolver (`resolver`)**: pure mapping of fetch prefix + project name
//!   to a clone URL.
//! - **Oracle (`oracle`, `git`)**: the single network-facing query, bounded
//!   by a timeout; the default shells out to `git ls-remote`.
//! - **Engine (`engine`)**: checks each project, optionally in parallel, and
//!   never lets one failure abort the others.
//! - **Report (`report`, `outcome`)**: per-project outcomes in manifest order
//!   plus the counts that decide the exit status.

pub mod defaults;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod manifest;
pub mod oracle;
pub mod outcome;
pub mod output;
pub mod report;
pub mod resolver;
