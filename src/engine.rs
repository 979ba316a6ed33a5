//! # Verification Engine
//!
//! Drives a full verification run: every project in the manifest goes
//! through the same three steps and ends in exactly one
//! [`CheckOutcome`].
//!
//! 1.  **Remote lookup**: no `remote` attribute gives `MissingRemoteField`, a
//!     remote the manifest doesn't declare gives `UnknownRemote`. Neither
//!     touches the network.
//! 2.  **Resolve**: the URL resolver builds the clone URL. A resolver error
//!     is reported as a `TransportError` for that project.
//! 3.  **Check**: the [`RemoteOracle`] is queried once with the URL and the
//!     pinned revision; its answer is final.
//!
//! A failing project never stops the run. With `jobs > 1` the checks run on a
//! dedicated rayon pool of that size; results are collected in manifest order
//! either way, so the report is identical to a sequential run.

use std::time::Duration;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::defaults;
use crate::manifest::{Manifest, ProjectSpec};
use crate::oracle::{GitOracle, RemoteOracle};
use crate::outcome::CheckOutcome;
use crate::report::{ProjectReport, Report};
use crate::resolver::{self, ResolvedTarget};

/// Operational parameters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Upper bound for each individual oracle call.
    pub timeout: Duration,
    /// Number of projects checked at once. `1` checks them one by one.
    pub jobs: usize,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            timeout: defaults::check_timeout(),
            jobs: defaults::DEFAULT_JOBS,
        }
    }
}

/// Runs every project of a manifest through the oracle.
pub struct Verifier {
    oracle: Box<dyn RemoteOracle>,
    options: VerifyOptions,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier {
    /// A verifier backed by `git ls-remote` with default options.
    pub fn new() -> Self {
        Self::with_oracle(Box::new(GitOracle))
    }

    /// A verifier backed by a custom oracle.
    pub fn with_oracle(oracle: Box<dyn RemoteOracle>) -> Self {
        Self {
            oracle,
            options: VerifyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: VerifyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Check every project and build the report.
    pub fn run(&self, manifest: &Manifest) -> Report {
        self.run_with_progress(manifest, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_done` as each project finishes.
    ///
    /// With concurrent checks `on_done` is called from worker threads in
    /// completion order; only the returned report is guaranteed to be in
    /// manifest order.
    pub fn run_with_progress<F>(&self, manifest: &Manifest, on_done: F) -> Report
    where
        F: Fn(&ProjectReport) + Sync,
    {
        let check = |project: &ProjectSpec| {
            let entry = self.verify_project(manifest, project);
            on_done(&entry);
            entry
        };

        let jobs = self.options.jobs.max(1);
        let entries: Vec<ProjectReport> = if jobs == 1 || manifest.projects.len() < 2 {
            manifest.projects.iter().map(check).collect()
        } else {
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| manifest.projects.par_iter().map(check).collect()),
                Err(e) => {
                    warn!("Could not start {} workers ({}), checking sequentially", jobs, e);
                    manifest.projects.iter().map(check).collect()
                }
            }
        };

        let report = Report::new(entries);
        info!(
            "Verified {} project(s): {} accessible, {} failed",
            report.len(),
            report.success_count(),
            report.failure_count()
        );
        report
    }

    /// Run the per-project state machine for a single project.
    pub fn verify_project(&self, manifest: &Manifest, project: &ProjectSpec) -> ProjectReport {
        let (url, outcome) = self.classify_project(manifest, project);
        if outcome.is_structural() {
            info!("{}: {} (manifest problem, not queried)", project.name, outcome);
        } else if !outcome.is_accessible() {
            info!("{}: {}", project.name, outcome);
        }
        ProjectReport {
            project: project.clone(),
            url,
            outcome,
        }
    }

    fn classify_project(
        &self,
        manifest: &Manifest,
        project: &ProjectSpec,
    ) -> (Option<String>, CheckOutcome) {
        let target = match resolve_project(manifest, project) {
            Ok(target) => target,
            Err(outcome) => return (None, outcome),
        };
        debug!("{} -> {}", project.name, target.url);

        let outcome = self
            .oracle
            .check(&target.url, project.revision.as_deref(), self.options.timeout);
        (Some(target.url), outcome)
    }
}

/// Steps 1 and 2 of the per-project state machine, without any network access.
///
/// Returns the resolved target, or the structural outcome that ends the
/// check for this project.
pub fn resolve_project(
    manifest: &Manifest,
    project: &ProjectSpec,
) -> std::result::Result<ResolvedTarget, CheckOutcome> {
    let Some(remote_name) = project.remote.as_deref() else {
        return Err(CheckOutcome::MissingRemoteField);
    };
    let Some(remote) = manifest.remotes.get(remote_name) else {
        return Err(CheckOutcome::UnknownRemote {
            remote: remote_name.to_string(),
        });
    };
    resolver::resolve_target(remote, project)
        .map_err(|e| CheckOutcome::transport_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::RemoteSpec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<(String, Option<String>, Duration)>>>;

    /// Oracle answering from a fixed table, recording every call.
    struct ScriptedOracle {
        answers: HashMap<String, CheckOutcome>,
        calls: CallLog,
    }

    impl ScriptedOracle {
        fn new(answers: &[(&str, CheckOutcome)]) -> (Self, CallLog) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let oracle = Self {
                answers: answers
                    .iter()
                    .map(|(url, outcome)| (url.to_string(), outcome.clone()))
                    .collect(),
                calls: Arc::clone(&calls),
            };
            (oracle, calls)
        }
    }

    impl RemoteOracle for ScriptedOracle {
        fn check(&self, url: &str, revision: Option<&str>, timeout: Duration) -> CheckOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), revision.map(str::to_string), timeout));
            self.answers
                .get(url)
                .cloned()
                .unwrap_or(CheckOutcome::RepoUnreachable {
                    revision_pinned: revision.is_some(),
                })
        }
    }

    fn manifest() -> Manifest {
        let mut manifest = Manifest::new();
        manifest.add_remote(RemoteSpec::new("aosp", "android.googlesource.com"));
        manifest.add_remote(RemoteSpec::new("gh", "https://github.com/"));
        manifest
    }

    #[test]
    fn test_missing_remote_skips_oracle() {
        let mut manifest = manifest();
        manifest.add_project(ProjectSpec::new("foo"));
        let (oracle, calls) = ScriptedOracle::new(&[]);

        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);

        assert_eq!(report.entries()[0].outcome, CheckOutcome::MissingRemoteField);
        assert_eq!(report.entries()[0].url, None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_remote_skips_oracle() {
        let mut manifest = manifest();
        manifest.add_project(ProjectSpec::new("foo").with_remote("gitlab"));
        let (oracle, calls) = ScriptedOracle::new(&[]);

        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);

        assert_eq!(
            report.entries()[0].outcome,
            CheckOutcome::UnknownRemote {
                remote: "gitlab".to_string()
            }
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_name_is_transport_error() {
        let mut manifest = manifest();
        manifest.add_project(ProjectSpec::new("/").with_remote("gh"));
        let (oracle, calls) = ScriptedOracle::new(&[]);

        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);

        match &report.entries()[0].outcome {
            CheckOutcome::TransportError { detail } => {
                assert!(detail.contains("Invalid project name"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_scenario_revision_found_and_missing() {
        let url = "https://android.googlesource.com/platform/frameworks/base.git";
        let mut manifest = manifest();
        manifest.add_project(
            ProjectSpec::new("platform/frameworks/base")
                .with_remote("aosp")
                .with_revision("main"),
        );

        let (oracle, calls) = ScriptedOracle::new(&[(url, CheckOutcome::Accessible)]);
        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);
        assert_eq!(report.entries()[0].url.as_deref(), Some(url));
        assert_eq!(report.entries()[0].outcome, CheckOutcome::Accessible);
        assert_eq!(
            calls.lock().unwrap()[0],
            (url.to_string(), Some("main".to_string()), Duration::from_secs(30))
        );

        let missing = CheckOutcome::RevisionMissing {
            revision: "main".to_string(),
        };
        let (oracle, _) = ScriptedOracle::new(&[(url, missing.clone())]);
        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);
        assert_eq!(report.entries()[0].outcome, missing);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_failures_do_not_stop_later_projects() {
        let mut manifest = manifest();
        for name in ["a", "b", "c", "d"] {
            manifest.add_project(ProjectSpec::new(name).with_remote("gh"));
        }
        let (oracle, calls) = ScriptedOracle::new(&[
            ("https://github.com/a.git", CheckOutcome::Accessible),
            ("https://github.com/b.git", CheckOutcome::Timeout),
            (
                "https://github.com/c.git",
                CheckOutcome::transport_error("connection reset"),
            ),
            ("https://github.com/d.git", CheckOutcome::Accessible),
        ]);

        let report = Verifier::with_oracle(Box::new(oracle)).run(&manifest);

        assert_eq!(report.len(), 4);
        assert_eq!(calls.lock().unwrap().len(), 4);
        assert_eq!(report.entries()[1].outcome, CheckOutcome::Timeout);
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Accessible);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 2);
    }

    #[test]
    fn test_concurrent_run_keeps_manifest_order() {
        let mut manifest = manifest();
        let names: Vec<String> = (0..32).map(|i| format!("project-{:02}", i)).collect();
        for name in &names {
            manifest.add_project(ProjectSpec::new(name.as_str()).with_remote("gh"));
        }
        let answers: Vec<(String, CheckOutcome)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let outcome = if i % 3 == 0 {
                    CheckOutcome::Timeout
                } else {
                    CheckOutcome::Accessible
                };
                (format!("https://github.com/{}.git", name), outcome)
            })
            .collect();
        let answer_refs: Vec<(&str, CheckOutcome)> = answers
            .iter()
            .map(|(url, outcome)| (url.as_str(), outcome.clone()))
            .collect();
        let (oracle, _) = ScriptedOracle::new(&answer_refs);

        let progress = Mutex::new(0usize);
        let report = Verifier::with_oracle(Box::new(oracle))
            .with_options(VerifyOptions {
                timeout: Duration::from_secs(5),
                jobs: 8,
            })
            .run_with_progress(&manifest, |_| *progress.lock().unwrap() += 1);

        let reported: Vec<&str> = report.entries().iter().map(|e| e.project.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(reported, expected);
        assert_eq!(*progress.lock().unwrap(), 32);
        assert_eq!(report.failure_count(), 11);
    }

    #[test]
    fn test_resolve_project_without_network() {
        let mut manifest = manifest();
        let project = ProjectSpec::new("/platform/build/").with_remote("aosp");
        manifest.add_project(project.clone());

        let target = resolve_project(&manifest, &project).unwrap();
        assert_eq!(target.url, "https://android.googlesource.com/platform/build.git");
        assert_eq!(
            resolve_project(&manifest, &ProjectSpec::new("x")).unwrap_err(),
            CheckOutcome::MissingRemoteField
        );
    }

    #[test]
    fn test_empty_manifest_succeeds() {
        let (oracle, _) = ScriptedOracle::new(&[]);
        let report = Verifier::with_oracle(Box::new(oracle)).run(&Manifest::new());
        assert!(report.is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_default_options() {
        let options = VerifyOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.jobs, 1);

        let verifier = Verifier::new().with_options(VerifyOptions {
            timeout: Duration::from_secs(5),
            jobs: 8,
        });
        assert_eq!(verifier.options().timeout, Duration::from_secs(5));
        assert_eq!(verifier.options().jobs, 8);
    }
}
