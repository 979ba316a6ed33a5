//! # Completions Command Implementation
//!
//! Writes a shell completion script for `manifest-verify` to stdout.
//!
//! ```bash
//! manifest-verify completions bash > ~/.local/share/bash-completion/completions/manifest-verify
//! manifest-verify completions zsh > ~/.zfunc/_manifest-verify
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use manifest_verify::exit_codes;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for (bash, zsh, fish, powershell, elvish)
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<i32> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(exit_codes::SUCCESS)
}
