//! Upstream release URL construction.
//!
//! HashiCorp publishes Terraform releases at a fixed URL scheme: one zip
//! per architecture, a `SHA256SUMS` manifest covering all of them, and a
//! detached GPG signature over the manifest.

/// Base URL of the Terraform release tree.
const RELEASE_BASE: &str = "https://releases.hashicorp.com/terraform";

/// URL of the release zip for a Terraform version and architecture.
///
/// # Examples
///
/// ```
/// use terraform_wheels::release::archive_url;
///
/// assert_eq!(
///     archive_url("1.5.7", "linux_amd64"),
///     "https://releases.hashicorp.com/terraform/1.5.7/terraform_1.5.7_linux_amd64.zip"
/// );
/// ```
#[must_use]
pub fn archive_url(version: &str, arch: &str) -> String {
    format!("{RELEASE_BASE}/{version}/terraform_{version}_{arch}.zip")
}

/// URL of the `SHA256SUMS` checksum manifest for a Terraform version.
#[must_use]
pub fn sha256sums_url(version: &str) -> String {
    format!("{RELEASE_BASE}/{version}/terraform_{version}_SHA256SUMS")
}

/// URL of the detached signature over the checksum manifest.
#[must_use]
pub fn signature_url(version: &str) -> String {
    format!("{RELEASE_BASE}/{version}/terraform_{version}_SHA256SUMS.sig")
}

/// The final path segment of a release URL, used as the local file name.
#[must_use]
pub fn remote_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
