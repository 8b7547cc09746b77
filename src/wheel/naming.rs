//! Wheel naming policy.
//!
//! Constructs deterministic wheel file names in the binary-distribution
//! format `<distribution>-<version>-<python tags>-<abi tags>-<platform>.whl`,
//! with every name component normalized so it is safe as a path segment.

use std::fmt;

/// Interpreter tags the wheels claim compatibility with.
pub const PYTHON_TAGS: &[&str] = &["py2", "py3"];

/// ABI tags the wheels claim compatibility with.
pub const ABI_TAGS: &[&str] = &["none"];

/// The fixed file extension for wheel archives.
pub const WHEEL_EXTENSION: &str = ".whl";

/// Normalize a string for use as part of a wheel file name.
///
/// Collapses every run of `-`, `_`, and `.` into a single `_`. The
/// operation is idempotent.
///
/// # Examples
///
/// ```
/// use terraform_wheels::wheel::naming::normalize;
///
/// assert_eq!(normalize("terraform-binary-wheel"), "terraform_binary_wheel");
/// assert_eq!(normalize("a--b__c..d"), "a_b_c_d");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// The distribution/version identity shared by all wheels of one run.
///
/// Provides the `<distribution>-<version>` prefix that names the `.data`
/// and `.dist-info` directories inside each wheel, and derives the full
/// per-platform file stem.
///
/// # Examples
///
/// ```
/// use terraform_wheels::wheel::naming::WheelId;
///
/// let id = WheelId::new("terraform-binary-wheel", "1.5.7.rc0");
/// assert_eq!(id.prefix(), "terraform_binary_wheel-1.5.7.rc0");
/// assert_eq!(
///     id.file_name("win_amd64"),
///     "terraform_binary_wheel-1.5.7.rc0-py2.py3-none-win_amd64.whl"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelId {
    distribution: String,
    version: String,
}

impl WheelId {
    /// Create a wheel identity from the raw package name and the derived
    /// package version. The name is normalized; the version is expected to
    /// be normalized already (see [`crate::version::ReleaseTag`]).
    #[must_use]
    pub fn new(package_name: &str, package_version: &str) -> Self {
        Self {
            distribution: normalize(package_name),
            version: package_version.to_owned(),
        }
    }

    /// Return the `<distribution>-<version>` prefix.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.distribution, self.version)
    }

    /// Name of the `.data` directory inside the wheel.
    #[must_use]
    pub fn data_dir(&self) -> String {
        format!("{}.data", self.prefix())
    }

    /// Name of the `.dist-info` directory inside the wheel.
    #[must_use]
    pub fn dist_info_dir(&self) -> String {
        format!("{}.dist-info", self.prefix())
    }

    /// The wheel file stem for one platform, without extension.
    #[must_use]
    pub fn file_stem(&self, platform: &str) -> String {
        format!(
            "{}-{}-{}-{platform}",
            self.prefix(),
            PYTHON_TAGS.join("."),
            ABI_TAGS.join(".")
        )
    }

    /// The wheel file name for one platform.
    #[must_use]
    pub fn file_name(&self, platform: &str) -> String {
        format!("{}{WHEEL_EXTENSION}", self.file_stem(platform))
    }
}

impl fmt::Display for WheelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
