//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `manifest-verify` library. It uses the `thiserror` library to create an
//! `Error` enum covering the failure modes that can occur while loading a
//! manifest, resolving project URLs, or running the underlying `git` query.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries enough context (path, project, url, stderr) to be
//!   actionable on its own.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Only manifest loading errors ever terminate a run. Everything that happens
//! while checking a single project is converted into a
//! [`CheckOutcome`](crate::outcome::CheckOutcome) by the verification engine,
//! so one broken repository can never abort the report for the others.

use thiserror::Error;

/// Main error type for manifest-verify operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest document could not be parsed or has the wrong shape.
    ///
    /// Includes an optional hint about how to fix the document.
    #[error("Manifest parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// The manifest file could not be read.
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A project name is empty once leading and trailing separators are removed.
    #[error("Invalid project name '{name}': name is empty after trimming '/'")]
    InvalidProjectName { name: String },

    /// The `git` executable could not be spawned or waited on.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization error, wrapped from `serde_json::Error`.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
