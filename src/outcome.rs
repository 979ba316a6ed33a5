//! Classification of a single project check.

use std::fmt;

use serde::Serialize;

/// The result of checking one project. Exactly one is produced per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The repository responded and, if pinned, the revision exists.
    Accessible,
    /// The repository is reachable but the pinned revision was not listed.
    RevisionMissing { revision: String },
    /// The query failed outright. Missing repositories, auth failures and
    /// network failures all land here since `git` doesn't tell them apart.
    RepoUnreachable { revision_pinned: bool },
    /// No answer within the per-check timeout. A retry may help.
    Timeout,
    /// The project names a remote that the manifest doesn't declare.
    UnknownRemote { remote: String },
    /// The project has no `remote` attribute.
    MissingRemoteField,
    /// Any other failure, with the raw diagnostic.
    TransportError { detail: String },
}

impl CheckOutcome {
    pub fn transport_error(detail: impl Into<String>) -> Self {
        CheckOutcome::TransportError {
            detail: detail.into(),
        }
    }

    pub fn is_accessible(&self) -> bool {
        matches!(self, CheckOutcome::Accessible)
    }

    /// True for outcomes decided from the manifest alone, without any network query.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CheckOutcome::UnknownRemote { .. } | CheckOutcome::MissingRemoteField
        )
    }

    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckOutcome::Accessible => "accessible",
            CheckOutcome::RevisionMissing { .. } => "revision_missing",
            CheckOutcome::RepoUnreachable { .. } => "repo_unreachable",
            CheckOutcome::Timeout => "timeout",
            CheckOutcome::UnknownRemote { .. } => "unknown_remote",
            CheckOutcome::MissingRemoteField => "missing_remote_field",
            CheckOutcome::TransportError { .. } => "transport_error",
        }
    }

    /// Human-readable explanation, used in the failure summary.
    pub fn message(&self) -> String {
        match self {
            CheckOutcome::Accessible => "OK".to_string(),
            CheckOutcome::RevisionMissing { revision } => {
                format!("Revision '{}' does not exist", revision)
            }
            CheckOutcome::RepoUnreachable {
                revision_pinned: true,
            } => "Repository not accessible or revision not found".to_string(),
            CheckOutcome::RepoUnreachable {
                revision_pinned: false,
            } => "Repository not accessible".to_string(),
            CheckOutcome::Timeout => "Timeout - repository took too long to respond".to_string(),
            CheckOutcome::UnknownRemote { remote } => format!("Unknown remote: {}", remote),
            CheckOutcome::MissingRemoteField => "No remote specified".to_string(),
            CheckOutcome::TransportError { detail } => detail.clone(),
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
