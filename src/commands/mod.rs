//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `manifest-verify` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, performs the
//!   command's logic, and returns the process exit code.
//!
//! The `execute` function calls into the `manifest_verify` library for the
//! actual work; commands only load input and print results.

pub mod completions;
pub mod resolve;
pub mod verify;
