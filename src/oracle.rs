//! # Remote Existence Oracle
//!
//! The oracle answers one question: does this repository respond, and does
//! the pinned revision exist in it? It is the only network-facing part of
//! the verifier.
//!
//! ## Design
//!
//! The engine only sees the [`RemoteOracle`] trait, so the subprocess-backed
//! [`GitOracle`] used by the CLI can be swapped for a native client, or for a
//! scripted fake in tests, without touching the engine.
//!
//! Classification of a `git ls-remote --exit-code` call:
//!
//! | situation                                   | outcome             |
//! |---------------------------------------------|---------------------|
//! | no answer before the deadline               | `Timeout`           |
//! | `git` failed to start, or died by signal    | `TransportError`    |
//! | no revision, exit 0                         | `Accessible`        |
//! | no revision, non-zero exit                  | `RepoUnreachable`   |
//! | revision, exit 0 with a listed ref          | `Accessible`        |
//! | revision, exit 0 and empty, or exit 2       | `RevisionMissing`   |
//! | revision, any other non-zero exit           | `RepoUnreachable`   |
//!
//! The split between `RepoUnreachable` and `RevisionMissing` is best effort:
//! git reports an unreachable repository with exit 128, and an empty match
//! with exit 2, but nothing stronger than that is promised.

use std::time::Duration;

use crate::git::{self, LsRemote, LS_REMOTE_NO_MATCH};
use crate::outcome::CheckOutcome;

/// Ref queried when a project doesn't pin a revision.
pub const DEFAULT_REF: &str = "HEAD";

/// Answers whether a repository (and optionally a revision in it) exists.
///
/// Implementations perform at most one remote query per call, never retry,
/// and must return within roughly `timeout`.
pub trait RemoteOracle: Send + Sync {
    fn check(&self, url: &str, revision: Option<&str>, timeout: Duration) -> CheckOutcome;
}

/// The default oracle, shelling out to `git ls-remote`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitOracle;

impl RemoteOracle for GitOracle {
    fn check(&self, url: &str, revision: Option<&str>, timeout: Duration) -> CheckOutcome {
        match git::ls_remote(url, revision.unwrap_or(DEFAULT_REF), timeout) {
            Ok(listing) => classify(&listing, revision),
            Err(e) => CheckOutcome::transport_error(e.to_string()),
        }
    }
}

/// Map a finished `ls-remote` call to an outcome.
pub fn classify(listing: &LsRemote, revision: Option<&str>) -> CheckOutcome {
    if listing.timed_out {
        return CheckOutcome::Timeout;
    }

    let Some(code) = listing.exit_code else {
        let detail = if listing.stderr.is_empty() {
            "git ls-remote terminated by signal".to_string()
        } else {
            listing.stderr.clone()
        };
        return CheckOutcome::transport_error(detail);
    };

    match revision {
        None if listing.success() => CheckOutcome::Accessible,
        None => CheckOutcome::RepoUnreachable {
            revision_pinned: false,
        },
        Some(revision) => match code {
            0 if !listing.refs.is_empty() => CheckOutcome::Accessible,
            0 | LS_REMOTE_NO_MATCH => CheckOutcome::RevisionMissing {
                revision: revision.to_string(),
            },
            _ => CheckOutcome::RepoUnreachable {
                revision_pinned: true,
            },
        },
    }
}
