//! The aggregate result of a verification run.

use serde::Serialize;

use crate::exit_codes;
use crate::manifest::ProjectSpec;
use crate::outcome::CheckOutcome;

/// Outcome for one project, plus the URL it resolved to (if it got that far).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project: ProjectSpec,
    pub url: Option<String>,
    pub outcome: CheckOutcome,
}

/// Finalized per-project outcomes in manifest order.
///
/// Built once from the complete list of entries; counts are derived at
/// construction and the value is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    entries: Vec<ProjectReport>,
    success_count: usize,
    failure_count: usize,
}

impl Report {
    pub fn new(entries: Vec<ProjectReport>) -> Self {
        let success_count = entries.iter().filter(|e| e.outcome.is_accessible()).count();
        let failure_count = entries.len() - success_count;
        Self {
            entries,
            success_count,
            failure_count,
        }
    }

    pub fn entries(&self) -> &[ProjectReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    /// True when every project is accessible, including when there are none.
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProjectReport> {
        self.entries.iter().filter(|e| !e.outcome.is_accessible())
    }

    /// Process exit status for this report.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}
