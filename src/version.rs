//! Release tag parsing and version derivation.
//!
//! One release tag drives two version strings: the wheel package version,
//! which keeps pre-release and build components in normalized form, and the
//! Terraform version, which is the finalized `major.minor.patch` release
//! the upstream archives are published under.

use crate::error::{Result, WheelError};
use crate::wheel::naming::normalize;

/// A parsed release tag.
///
/// # Examples
///
/// ```
/// use terraform_wheels::version::ReleaseTag;
///
/// let tag = ReleaseTag::parse("1.5.7-rc0").unwrap();
/// assert_eq!(tag.package_version(), "1.5.7.rc0");
/// assert_eq!(tag.terraform_version(), "1.5.7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    version: semver::Version,
}

impl ReleaseTag {
    /// Parse a semantic-version tag.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::TagParse`] if the tag violates
    /// semantic-versioning grammar.
    pub fn parse(tag: &str) -> Result<Self> {
        let version = semver::Version::parse(tag).map_err(|e| WheelError::TagParse {
            tag: tag.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { version })
    }

    /// The wheel package version: numeric components plus any pre-release
    /// and build components, each normalized and joined with `.`.
    #[must_use]
    pub fn package_version(&self) -> String {
        let mut parts = vec![
            self.version.major.to_string(),
            self.version.minor.to_string(),
            self.version.patch.to_string(),
        ];
        if !self.version.pre.is_empty() {
            parts.push(normalize(self.version.pre.as_str()));
        }
        if !self.version.build.is_empty() {
            parts.push(normalize(self.version.build.as_str()));
        }
        parts.join(".")
    }

    /// The finalized Terraform version with pre-release and build stripped.
    #[must_use]
    pub fn terraform_version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        )
    }
}
