//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixtures that write a manifest into a temporary
//! directory and, when `git` is installed, build local repositories that a
//! manifest can point at through a `file://` remote. No test here touches
//! the network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::STRUCTURAL_ONLY);
//!     fixture.verify().assert().code(1);
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{git_available, GitFixture, TestFixture};
}

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Projects that fail before any network access.
    pub const STRUCTURAL_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest>
  <remote name="aosp" fetch="android.googlesource.com" />
  <project path="device/acme/widget" name="acme/device_acme_widget" />
  <project name="acme/vendor_acme" remote="gitlab" revision="main" />
</manifest>
"#;

    /// A manifest with no projects at all.
    pub const EMPTY: &str =
        "<manifest>\n  <remote name=\"aosp\" fetch=\"android.googlesource.com\" />\n</manifest>\n";

    /// Not well-formed XML.
    pub const MALFORMED: &str = "<manifest><project name=\"x\"></manifest>";

    /// Well-formed, but not a manifest.
    pub const WRONG_ROOT: &str = "<projects><project name=\"x\" /></projects>";
}

/// Returns `true` if a usable `git` executable is on `PATH`.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary directory holding a manifest file.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `manifest.xml` with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("manifest.xml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Write the manifest at the default `.repo/local_manifests` location.
    pub fn with_default_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child(".repo/local_manifests/local_manifest.xml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.temp_dir.path().join("manifest.xml")
    }

    /// A command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("manifest-verify");
        cmd.current_dir(self.path())
            .env_remove("MANIFEST_VERIFY_MANIFEST")
            .env_remove("MANIFEST_VERIFY_TIMEOUT")
            .env_remove("MANIFEST_VERIFY_JOBS")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// `manifest-verify verify --manifest manifest.xml --no-progress`.
    pub fn verify(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("verify")
            .arg("--manifest")
            .arg(self.manifest_path())
            .arg("--no-progress");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Bare git repositories under a temporary directory, reachable through a
/// `file://` fetch prefix.
#[allow(dead_code)]
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// The `fetch` attribute to use for a remote serving these repositories.
    pub fn fetch_prefix(&self) -> String {
        format!("file://{}", self.temp_dir.path().display())
    }

    /// Create a bare repository `<name>.git` with one commit on `main` and a
    /// `v1.0.0` tag.
    pub fn add_repo(&self, name: &str) -> &Self {
        let work = self
            .temp_dir
            .path()
            .join("work")
            .join(name.replace('/', "-"));
        std::fs::create_dir_all(&work).expect("Failed to create work tree");

        git(&work, &["init", "-q"]);
        git(&work, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(
            &work,
            &[
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "-q",
                "--allow-empty",
                "-m",
                "initial",
            ],
        );
        git(&work, &["-c", "tag.gpgsign=false", "tag", "v1.0.0"]);

        let bare = self.temp_dir.path().join(format!("{}.git", name));
        if let Some(parent) = bare.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let status = Command::new("git")
            .args(["clone", "-q", "--bare"])
            .arg(&work)
            .arg(&bare)
            .status()
            .expect("Failed to run git clone");
        assert!(status.success(), "git clone --bare failed");
        self
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}
