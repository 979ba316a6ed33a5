//! # Resolve Command Implementation
//!
//! Prints the clone URL of every project without contacting any remote. It
//! runs the same remote lookup and URL construction as `verify`, so it
//! reports missing and unknown remotes too, and exits non-zero if any
//! project can't be resolved.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use manifest_verify::defaults;
use manifest_verify::engine::resolve_project;
use manifest_verify::exit_codes;
use manifest_verify::manifest;
use manifest_verify::output::{emoji, OutputConfig};

/// Print the URL each project resolves to
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the manifest XML file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "MANIFEST_VERIFY_MANIFEST",
        default_value_os_t = defaults::manifest_path()
    )]
    pub manifest: PathBuf,
}

/// Execute the `resolve` command.
pub fn execute(args: ResolveArgs, color_flag: &str) -> Result<i32> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let manifest = manifest::from_file(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    let mut failed = 0usize;
    for project in &manifest.projects {
        match resolve_project(&manifest, project) {
            Ok(target) => println!("{} -> {}", project.name, target.url),
            Err(outcome) => {
                failed += 1;
                println!(
                    "{} {} - {}",
                    emoji(&out, "❌", "[FAIL]"),
                    project.name,
                    outcome
                );
            }
        }
    }

    Ok(if failed == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    })
}
