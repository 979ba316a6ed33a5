//! # Output Rendering
//!
//! This module renders a finished [`Report`] for people (a text report with
//! optional colors and emojis) and for tools (JSON). Rendering happens after
//! the run, so the same report value can be asserted on in tests without
//! capturing the console.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use manifest_verify::output::{render_report, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! render_report(&mut std::io::stdout(), &manifest, &report, &config)?;
//! ```

use std::env;
use std::io::Write;

use console::Style;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::report::Report;

const RULE_WIDTH: usize = 60;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.use_color)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn banner<W: Write>(out: &mut W, config: &OutputConfig, title: &str) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let bold = config.style(Style::new().bold());
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", bold.apply_to(title))?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

/// Render the human-readable report.
///
/// Lists the remotes, one block per project in manifest order, then a
/// summary with the accessible/failed counts and every failure.
pub fn render_report<W: Write>(
    out: &mut W,
    manifest: &Manifest,
    report: &Report,
    config: &OutputConfig,
) -> Result<()> {
    let green = config.style(Style::new().green());
    let red = config.style(Style::new().red());
    let yellow = config.style(Style::new().yellow());
    let dim = config.style(Style::new().dim());

    banner(out, config, "VERIFYING MANIFEST REPOSITORIES")?;
    for remote in manifest.remotes_in_order() {
        writeln!(
            out,
            "{} Remote '{}': {}",
            emoji(config, "📍", "[REMOTE]"),
            remote.name,
            remote.fetch_prefix
        )?;
    }
    if manifest.remotes.is_empty() {
        writeln!(
            out,
            "{}",
            yellow.apply_to(format!(
                "{}  No remotes defined in manifest",
                emoji(config, "⚠️", "[WARN]")
            ))
        )?;
    }
    writeln!(out)?;

    let total = report.len();
    writeln!(out, "Found {} project(s) to verify", total)?;
    if !manifest.removed_projects.is_empty() {
        writeln!(
            out,
            "{}",
            dim.apply_to(format!(
                "Skipping {} remove-project entr{}",
                manifest.removed_projects.len(),
                if manifest.removed_projects.len() == 1 { "y" } else { "ies" }
            ))
        )?;
    }
    writeln!(out)?;

    for (index, entry) in report.entries().iter().enumerate() {
        let project = &entry.project;
        writeln!(
            out,
            "[{}/{}] {} Checking: {}",
            index + 1,
            total,
            emoji(config, "🔍", "[SCAN]"),
            project.name
        )?;
        writeln!(out, "     Path: {}", project.path)?;
        writeln!(
            out,
            "     Remote: {}",
            project.remote.as_deref().unwrap_or("(none)")
        )?;
        if let Some(revision) = &project.revision {
            writeln!(out, "     Revision: {}", revision)?;
        }
        if let Some(url) = &entry.url {
            writeln!(out, "     URL: {}", url)?;
        }
        if entry.outcome.is_accessible() {
            writeln!(
                out,
                "     {}",
                green.apply_to(format!("{} Accessible", emoji(config, "✅", "[OK]")))
            )?;
        } else {
            writeln!(
                out,
                "     {}",
                red.apply_to(format!(
                    "{} Failed: {}",
                    emoji(config, "❌", "[FAIL]"),
                    entry.outcome
                ))
            )?;
        }
        writeln!(out)?;
    }

    banner(out, config, "VERIFICATION SUMMARY")?;
    writeln!(
        out,
        "{} Accessible: {}",
        emoji(config, "✅", "[OK]"),
        report.success_count()
    )?;
    writeln!(
        out,
        "{} Failed: {}",
        emoji(config, "❌", "[FAIL]"),
        report.failure_count()
    )?;
    writeln!(out)?;

    if report.is_success() {
        writeln!(
            out,
            "{}",
            green.apply_to(format!(
                "{} All repositories are accessible and revisions exist!",
                emoji(config, "🎉", "[DONE]")
            ))
        )?;
    } else {
        writeln!(out, "FAILED REPOSITORIES:")?;
        for entry in report.failures() {
            writeln!(
                out,
                "  {} {} - {}",
                emoji(config, "•", "-"),
                entry.project.name,
                entry.outcome
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            yellow.apply_to(format!(
                "{}  Please check the repository URLs and revisions above",
                emoji(config, "⚠️", "[WARN]")
            ))
        )?;
    }

    Ok(())
}

/// Render the report as pretty-printed JSON.
pub fn render_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
