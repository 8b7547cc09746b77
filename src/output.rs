//! Progress and dry-run output formatting.
//!
//! User-facing progress goes to an injected writer so tests can capture
//! it; the `--quiet` flag is honoured by callers, not here.

use crate::platforms::PlatformTable;
use camino::Utf8Path;
use std::io::Write;

/// Write one line to the progress writer, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format a success message after a full run.
#[must_use]
pub fn success_message(count: usize, build_dir: &Utf8Path) -> String {
    let plural = if count == 1 { "wheel" } else { "wheels" };
    format!("Successfully built {count} {plural} in {build_dir}")
}

/// Configuration information for dry-run output.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// The release tag being built.
    pub tag: &'a str,
    /// Derived wheel package version.
    pub package_version: &'a str,
    /// Finalized Terraform version the downloads resolve to.
    pub terraform_version: &'a str,
    /// Workspace directory.
    pub build_dir: &'a Utf8Path,
    /// Platforms that would be built.
    pub platforms: &'a PlatformTable,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no files will be downloaded or written".to_owned(),
            String::new(),
            format!("Release tag: {}", self.tag),
            format!("Package version: {}", self.package_version),
            format!("Terraform version: {}", self.terraform_version),
            format!("Build directory: {}", self.build_dir),
            String::new(),
            "Platforms to build:".to_owned(),
        ];
        for entry in self.platforms.iter() {
            lines.push(format!("  - {} ({})", entry.tag, entry.arch));
        }
        lines.join("\n")
    }
}
