//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Manifest Verify - Check that every repository in a repo manifest is reachable
#[derive(Parser, Debug)]
#[command(name = "manifest-verify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every project of the manifest against its upstream repository
    Verify(commands::verify::VerifyArgs),

    /// Print the URL each project resolves to, without any network access
    Resolve(commands::resolve::ResolveArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code.
    pub fn execute(self) -> Result<i32> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Verify(args) => commands::verify::execute(args, &self.color),
            Commands::Resolve(args) => commands::resolve::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr.
///
/// `RUST_LOG` wins while `--log-level` is left at its default.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) if level == DEFAULT_LOG_LEVEL => builder.parse_filters(&filters),
        _ => builder.parse_filters(level),
    };
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}
