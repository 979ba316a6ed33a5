//! # Verify Command Implementation
//!
//! This module implements the `verify` subcommand: load the manifest, check
//! every project against its upstream repository, print the report, and exit
//! non-zero if any project failed.
//!
//! ## Functionality
//!
//! - **Manifest Loading**: A manifest that can't be read or parsed is the only
//!   error that stops the run before a report exists.
//! - **Checking**: Each project is checked once with `git ls-remote`, bounded
//!   by `--timeout`. `--jobs` runs several checks at once; the report keeps
//!   manifest order regardless.
//! - **Reporting**: The full report is always printed, as text or JSON, even
//!   when every project fails.
//!
//! This command is a safe, read-only operation that does not clone or modify
//! any repository.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use manifest_verify::defaults;
use manifest_verify::engine::{Verifier, VerifyOptions};
use manifest_verify::manifest;
use manifest_verify::output::{render_json, render_report, OutputConfig};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable JSON document
    Json,
}

/// Verify that every project in a manifest is accessible
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the manifest XML file to verify.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "MANIFEST_VERIFY_MANIFEST",
        default_value_os_t = defaults::manifest_path()
    )]
    pub manifest: PathBuf,

    /// Seconds each repository may take to answer before it counts as a timeout.
    #[arg(
        short,
        long,
        value_name = "SECS",
        env = "MANIFEST_VERIFY_TIMEOUT",
        default_value_t = defaults::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Number of repositories to check at the same time.
    #[arg(
        short,
        long,
        value_name = "N",
        env = "MANIFEST_VERIFY_JOBS",
        default_value_t = defaults::DEFAULT_JOBS as u64,
        value_parser = clap::value_parser!(u64).range(1..=defaults::MAX_JOBS as u64)
    )]
    pub jobs: u64,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Don't show a progress bar while checking.
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the `verify` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: VerifyArgs, color_flag: &str) -> Result<i32> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let manifest = manifest::from_file(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;
    log::info!(
        "Loaded {} remote(s) and {} project(s) from {}",
        manifest.remotes.len(),
        manifest.projects.len(),
        args.manifest.display()
    );

    let options = VerifyOptions {
        timeout: Duration::from_secs(args.timeout),
        jobs: usize::try_from(args.jobs).unwrap_or(defaults::DEFAULT_JOBS),
    };
    let verifier = Verifier::new().with_options(options);
    log::debug!(
        "Checking with a {:?} timeout and {} job(s)",
        verifier.options().timeout,
        verifier.options().jobs
    );

    let progress = progress_bar(&args, manifest.projects.len() as u64);
    let report = verifier.run_with_progress(&manifest, |entry| {
        progress.set_message(entry.project.name.clone());
        progress.inc(1);
    });
    progress.finish_and_clear();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Text => render_report(&mut handle, &manifest, &report, &out)?,
        OutputFormat::Json => render_json(&mut handle, &report)?,
    }
    handle.flush()?;

    Ok(report.exit_code())
}

/// A progress bar on stderr, hidden unless stderr is an interactive terminal.
fn progress_bar(args: &VerifyArgs, len: u64) -> ProgressBar {
    if args.no_progress || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(len).with_style(style);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
