//! # Manifest Verify CLI
//!
//! This is the binary entry point for the `manifest-verify` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning the command's result into the process exit status.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use manifest_verify::exit_codes;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let code = match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::FAILURE
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
