//! Explicit build configuration.
//!
//! All run inputs are resolved once, up front, into a [`BuildConfig`] that
//! is passed down the pipeline: the release tag (CLI flag, then the
//! `GIT_TAG` environment variable, then a built-in default), the workspace
//! directory, the fixed input file paths, and the platform table. Nothing
//! downstream reads the environment or the invocation directory.

use crate::cli::Cli;
use crate::error::{Result, WheelError};
use crate::platforms::PlatformTable;
use camino::{Utf8Path, Utf8PathBuf};

/// Environment variable supplying the release tag.
pub const GIT_TAG_VAR: &str = "GIT_TAG";

/// Release tag used when neither the CLI nor the environment supplies one.
pub const DEFAULT_TAG: &str = "1.5.7-rc0";

/// Default workspace directory, relative to the invocation directory.
const DEFAULT_BUILD_DIR: &str = "build";

/// License file embedded into every wheel.
const LICENSE_FILE: &str = "LICENSE";

/// README used as the package description body.
const README_FILE: &str = "README.md";

/// Keyring holding the trusted HashiCorp release keys.
const KEYRING_FILE: &str = "hashicorp.gpg";

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// The release tag to build.
    pub tag: String,
    /// Workspace directory for downloads and assembled wheels.
    pub build_dir: Utf8PathBuf,
    /// License file copied into each wheel.
    pub license_path: Utf8PathBuf,
    /// README providing the package description body.
    pub readme_path: Utf8PathBuf,
    /// Trusted keyring for signature verification.
    pub keyring_path: Utf8PathBuf,
    /// Platforms to build, in emission order.
    pub platforms: PlatformTable,
}

impl BuildConfig {
    /// Resolve the configuration from CLI arguments, the environment, and
    /// the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or a
    /// requested platform tag is unknown.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let invocation_dir = current_dir_utf8()?;
        Self::resolve(cli, &invocation_dir)
    }

    /// Resolve the configuration against an explicit invocation directory.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::UnknownPlatform`] if a requested platform tag
    /// is not in the table.
    pub fn resolve(cli: &Cli, invocation_dir: &Utf8Path) -> Result<Self> {
        let tag = cli
            .tag
            .clone()
            .or_else(|| std::env::var(GIT_TAG_VAR).ok())
            .unwrap_or_else(|| DEFAULT_TAG.to_owned());

        let platforms = if cli.platform.is_empty() {
            PlatformTable::default()
        } else {
            PlatformTable::default().subset(&cli.platform)?
        };

        let build_dir = cli
            .build_dir
            .as_deref()
            .unwrap_or(Utf8Path::new(DEFAULT_BUILD_DIR));

        Ok(Self {
            tag,
            build_dir: absolutize(invocation_dir, build_dir),
            license_path: invocation_dir.join(LICENSE_FILE),
            readme_path: invocation_dir.join(README_FILE),
            keyring_path: invocation_dir.join(KEYRING_FILE),
            platforms,
        })
    }
}

/// Anchor a possibly-relative path at the invocation directory.
fn absolutize(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        base.join(path)
    }
}

/// The current directory as a UTF-8 path.
fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| WheelError::InvalidWorkingDirectory {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}
