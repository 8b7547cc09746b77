//! CLI argument definitions for the wheel builder.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Build Terraform binary wheels.
#[derive(Parser, Debug)]
#[command(name = "terraform-wheels")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build Terraform binary wheels.\n\n",
    "For a given release tag this tool downloads the upstream SHA256SUMS ",
    "manifest and its detached signature, verifies the signature against the ",
    "hashicorp.gpg keyring in the current directory, downloads the release ",
    "zip for every supported platform, verifies the checksums, and assembles ",
    "one wheel per platform in the build directory.\n\n",
    "The release tag is taken from --tag, then the GIT_TAG environment ",
    "variable, then a built-in default. LICENSE, README.md, and ",
    "hashicorp.gpg must exist in the current directory.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build wheels for every supported platform:\n",
    "    $ terraform-wheels --tag 1.5.7\n\n",
    "  Build only the Windows wheels:\n",
    "    $ terraform-wheels --tag 1.5.7 -p win_amd64 -p win32\n\n",
    "  Preview the configuration without downloading anything:\n",
    "    $ terraform-wheels --dry-run\n",
))]
pub struct Cli {
    /// Release tag to build [default: $GIT_TAG, then a built-in tag].
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Workspace directory for downloads and wheels [default: build].
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<Utf8PathBuf>,

    /// Build a specific platform tag (can be repeated).
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Vec<String>,

    /// Show configuration and exit without downloading or building.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Cli {
    /// Creates a `Cli` instance with all flags disabled and no overrides.
    ///
    /// This is useful for testing or programmatic construction where only
    /// specific fields need to be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraform_wheels::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(cli.tag.is_none());
    /// assert!(cli.platform.is_empty());
    /// ```
    fn default() -> Self {
        Self {
            tag: None,
            build_dir: None,
            platform: Vec::new(),
            dry_run: false,
            quiet: false,
        }
    }
}
