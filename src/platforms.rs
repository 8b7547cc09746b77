//! Wheel-platform to Terraform-architecture table.
//!
//! Maps each supported wheel platform tag to the architecture identifier
//! HashiCorp uses in release archive names. The table is an immutable
//! ordered mapping constructed once at startup and passed into the
//! pipeline; iteration follows insertion order, which fixes both the
//! download order and the order wheels are emitted in.

use crate::error::{Result, WheelError};

/// One row of the platform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformEntry {
    /// The wheel platform tag (e.g. `win_amd64`).
    pub tag: &'static str,
    /// The Terraform release architecture (e.g. `windows_amd64`).
    pub arch: &'static str,
}

/// The supported platforms, in emission order.
const DEFAULT_PLATFORMS: &[PlatformEntry] = &[
    PlatformEntry {
        tag: "manylinux_2_5_x86_64.musllinux_1_1_x86_64",
        arch: "linux_amd64",
    },
    PlatformEntry {
        tag: "manylinux_2_5_i686.musllinux_1_1_i686",
        arch: "linux_386",
    },
    PlatformEntry {
        tag: "manylinux_2_5_aarch64.musllinux_1_1_aarch64",
        arch: "linux_arm64",
    },
    PlatformEntry {
        tag: "linux_armv6l.linux_armv7l",
        arch: "linux_arm",
    },
    PlatformEntry {
        tag: "macosx_11_0_x86_64",
        arch: "darwin_amd64",
    },
    PlatformEntry {
        tag: "macosx_11_0_arm64",
        arch: "darwin_arm64",
    },
    PlatformEntry {
        tag: "win_amd64",
        arch: "windows_amd64",
    },
    PlatformEntry {
        tag: "win32",
        arch: "windows_386",
    },
];

/// An immutable, ordered platform table.
///
/// # Examples
///
/// ```
/// use terraform_wheels::platforms::PlatformTable;
///
/// let table = PlatformTable::default();
/// assert_eq!(table.len(), 8);
/// assert_eq!(table.iter().next().unwrap().arch, "linux_amd64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTable {
    entries: Vec<PlatformEntry>,
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PLATFORMS.to_vec(),
        }
    }
}

impl PlatformTable {
    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformEntry> {
        self.entries.iter()
    }

    /// Number of platforms in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restrict the table to the given tags, preserving table order.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::UnknownPlatform`] if any requested tag is not
    /// present in the table.
    pub fn subset(&self, tags: &[String]) -> Result<Self> {
        for tag in tags {
            if !self.entries.iter().any(|e| e.tag == tag) {
                return Err(WheelError::UnknownPlatform { tag: tag.clone() });
            }
        }
        let entries = self
            .entries
            .iter()
            .filter(|e| tags.iter().any(|t| t == e.tag))
            .copied()
            .collect();
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_table_has_eight_platforms() {
        assert_eq!(PlatformTable::default().len(), 8);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let table = PlatformTable::default();
        let tags: Vec<&str> = table.iter().map(|e| e.tag).collect();
        assert_eq!(tags.first().copied(), Some("manylinux_2_5_x86_64.musllinux_1_1_x86_64"));
        assert_eq!(tags.last().copied(), Some("win32"));
    }

    #[rstest]
    #[case::macos_arm("macosx_11_0_arm64", "darwin_arm64")]
    #[case::macos_intel("macosx_11_0_x86_64", "darwin_amd64")]
    #[case::windows_32("win32", "windows_386")]
    fn tags_map_to_matching_architectures(#[case] tag: &str, #[case] arch: &str) {
        let table = PlatformTable::default();
        let entry = table.iter().find(|e| e.tag == tag).expect("tag present");
        assert_eq!(entry.arch, arch);
    }

    #[test]
    fn subset_keeps_table_order() {
        let table = PlatformTable::default();
        let subset = table
            .subset(&["win32".to_owned(), "macosx_11_0_arm64".to_owned()])
            .expect("both tags exist");
        let tags: Vec<&str> = subset.iter().map(|e| e.tag).collect();
        assert_eq!(tags, vec!["macosx_11_0_arm64", "win32"]);
    }

    #[test]
    fn subset_rejects_unknown_tag() {
        let table = PlatformTable::default();
        let err = table
            .subset(&["solaris_sparc".to_owned()])
            .expect_err("unknown tag must fail");
        assert!(matches!(
            err,
            WheelError::UnknownPlatform { tag } if tag == "solaris_sparc"
        ));
    }

    #[test]
    fn subset_with_no_tags_is_empty() {
        let table = PlatformTable::default();
        let subset = table.subset(&[]).expect("empty selection is valid");
        assert!(subset.is_empty());
    }
}
