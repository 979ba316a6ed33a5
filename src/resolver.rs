//! # URL Resolution
//!
//! Pure functions that map a remote's fetch prefix and a project name to the
//! clone URL that gets queried. No I/O happens here.
//!
//! The rules:
//!
//! - A fetch prefix without a scheme gets `https://` (never `http://`).
//! - A fetch prefix always ends in exactly one `/`.
//! - A project name loses leading and trailing `/`; embedded slashes stay.
//! - The URL ends in `.git`, appended only when missing.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::manifest::{ProjectSpec, RemoteSpec};

const DEFAULT_SCHEME: &str = "https://";

/// A project paired with the URL it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub project: ProjectSpec,
    pub url: String,
}

/// Returns true if `fetch` starts with `<scheme>://`.
fn has_scheme(fetch: &str) -> bool {
    match fetch.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Normalize a raw `fetch` attribute into a fetch prefix.
///
/// ```
/// use manifest_verify::resolver::normalize_fetch_prefix;
///
/// assert_eq!(normalize_fetch_prefix("example.com"), "https://example.com/");
/// assert_eq!(normalize_fetch_prefix("https://example.com//"), "https://example.com/");
/// assert_eq!(normalize_fetch_prefix("ssh://git@example.com"), "ssh://git@example.com/");
/// ```
pub fn normalize_fetch_prefix(fetch: &str) -> String {
    let fetch = fetch.trim();
    let mut prefix = if has_scheme(fetch) {
        fetch.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, fetch)
    };

    let trimmed_len = prefix.trim_end_matches('/').len();
    // Keep the slashes of a bare "scheme://" intact.
    if trimmed_len > 0 && !prefix[..trimmed_len].ends_with(':') {
        prefix.truncate(trimmed_len);
    }
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

/// Compute the clone URL for `project` under `remote`.
///
/// `remote.fetch_prefix` is expected to be normalized already, which is what
/// [`RemoteSpec::new`] guarantees.
pub fn resolve(remote: &RemoteSpec, project: &ProjectSpec) -> Result<String> {
    let name = project.name.trim_matches('/');
    if name.is_empty() {
        return Err(Error::InvalidProjectName {
            name: project.name.clone(),
        });
    }

    let mut url = format!("{}{}", remote.fetch_prefix, name);
    if !url.ends_with(".git") {
        url.push_str(".git");
    }
    Ok(url)
}

/// Resolve `project` into a [`ResolvedTarget`].
pub fn resolve_target(remote: &RemoteSpec, project: &ProjectSpec) -> Result<ResolvedTarget> {
    let url = resolve(remote, project)?;
    Ok(ResolvedTarget {
        project: project.clone(),
        url,
    })
}
