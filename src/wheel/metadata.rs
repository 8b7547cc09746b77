//! RFC-822-style metadata documents for the wheel `dist-info` directory.
//!
//! Both `METADATA` and `WHEEL` are flat header blocks: `Name: value` lines,
//! repeated for multi-valued headers in insertion order, a blank line, then
//! an optional body. No validation of header content is performed; callers
//! supply well-formed values.

use super::naming::{ABI_TAGS, PYTHON_TAGS};
use crate::version::ReleaseTag;

/// The published package name.
pub const PACKAGE_NAME: &str = "terraform-binary-wheel";

/// One-line package summary.
const PACKAGE_SUMMARY: &str = "Python wrapper around invoking terraform (https://www.terraform.io/)";

/// Project home page.
const PACKAGE_HOME_PAGE: &str = "https://github.com/c0m1c5an5/terraform-py";

/// Package author.
const PACKAGE_AUTHOR: &str = "Maksym Kondratenko";

/// Package author contact address.
const PACKAGE_AUTHOR_EMAIL: &str = "m.kondratenko.ua@gmail.com";

/// Trove classifiers describing the package.
const PACKAGE_CLASSIFIERS: &[&str] = &[
    "Topic :: Utilities",
    "Topic :: System :: Software Distribution",
    "Programming Language :: Python :: 2",
    "Programming Language :: Python :: 3",
    "Operating System :: POSIX :: Linux",
    "Operating System :: Microsoft :: Windows",
    "Operating System :: MacOS",
];

/// An ordered header block with an optional body.
///
/// # Examples
///
/// ```
/// use terraform_wheels::wheel::metadata::HeaderDocument;
///
/// let doc = HeaderDocument::new()
///     .header("Name", "example")
///     .header("Tag", "py2-none-any")
///     .header("Tag", "py3-none-any");
/// assert_eq!(doc.render(), "Name: example\nTag: py2-none-any\nTag: py3-none-any\n\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderDocument {
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HeaderDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one header line. Repeating a name yields a multi-valued
    /// header; insertion order is preserved.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Append one header line per value.
    #[must_use]
    pub fn headers(mut self, name: &str, values: &[&str]) -> Self {
        for value in values {
            self.headers.push((name.to_owned(), (*value).to_owned()));
        }
        self
    }

    /// Set the body payload appended after the headers.
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    /// Render to the flat text form: header lines, a blank line, then the
    /// body verbatim.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        if let Some(body) = &self.body {
            out.push_str(body);
        }
        out
    }
}

/// Build the package `METADATA` document.
///
/// Constructed once per run and reused unchanged for every platform; only
/// the `WHEEL` document varies per platform.
#[must_use]
pub fn package_metadata(tag: &ReleaseTag, license_file: &str, readme: &str) -> HeaderDocument {
    HeaderDocument::new()
        .header("Metadata-Version", "2.1")
        .header("Name", PACKAGE_NAME)
        .header("Version", &tag.package_version())
        .header("Summary", PACKAGE_SUMMARY)
        .header("Home-Page", PACKAGE_HOME_PAGE)
        .header("Author", PACKAGE_AUTHOR)
        .header("Author-Email", PACKAGE_AUTHOR_EMAIL)
        .header("License-File", license_file)
        .headers("Classifier", PACKAGE_CLASSIFIERS)
        .header("Requires-Python", ">=2")
        .header("Description-Content-Type", "text/markdown")
        .body(readme)
}

/// Build the `WHEEL` document for one platform: format version, generator,
/// the purelib flag, and one `Tag` header per interpreter × ABI × platform
/// combination.
#[must_use]
pub fn wheel_document(platform: &str) -> HeaderDocument {
    let mut doc = HeaderDocument::new()
        .header("Wheel-Version", "1.0")
        .header("Generator", "bdist_wheel 1.0")
        .header("Root-Is-Purelib", "false");
    for python_tag in PYTHON_TAGS {
        for abi_tag in ABI_TAGS {
            doc = doc.header("Tag", &format!("{python_tag}-{abi_tag}-{platform}"));
        }
    }
    doc
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
