//! Error types for the Terraform wheel builder.
//!
//! This module defines semantic error variants for every way a packaging run
//! can fail. None of these are recovered from: the pipeline propagates the
//! first failure to `main`, which prints the diagnostic and exits non-zero.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during a wheel-building run.
#[derive(Debug, Error)]
pub enum WheelError {
    /// The release tag does not follow semantic-versioning grammar.
    #[error("invalid release tag {tag}: {reason}")]
    TagParse {
        /// The offending tag string.
        tag: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// A requested platform tag is not in the platform table.
    #[error("unknown platform tag {tag}")]
    UnknownPlatform {
        /// The tag that was requested but not found.
        tag: String,
    },

    /// A required input file is missing from the invocation directory.
    #[error("{what} not found at {path}")]
    MissingInput {
        /// Human-readable name of the missing input.
        what: &'static str,
        /// Path where the input was expected.
        path: Utf8PathBuf,
    },

    /// The invocation directory could not be resolved.
    #[error("working directory unavailable: {reason}")]
    InvalidWorkingDirectory {
        /// Description of why resolution failed.
        reason: String,
    },

    /// The external transfer tool failed to retrieve a resource.
    #[error("download failed for {url}: {reason}")]
    Download {
        /// The URL that was being retrieved.
        url: String,
        /// The transfer tool's diagnostic output.
        reason: String,
    },

    /// GPG rejected the detached signature on the checksum manifest.
    #[error("signature verification failed: {reason}")]
    SignatureVerification {
        /// The signature tool's diagnostic output.
        reason: String,
    },

    /// A downloaded archive does not match the authenticated manifest.
    #[error("checksum verification failed: {reason}")]
    ChecksumMismatch {
        /// The checksum tool's diagnostic output.
        reason: String,
    },

    /// The unpacked release archive contains no Terraform binary.
    #[error("terraform binary not found under {dir}")]
    BinaryNotFound {
        /// The unpacked archive directory that was probed.
        dir: Utf8PathBuf,
    },

    /// An archive entry would escape its extraction directory.
    #[error("archive entry escapes extraction directory: {name}")]
    UnsafeArchiveEntry {
        /// The offending entry name from the archive.
        name: String,
    },

    /// Reading or writing a zip archive failed.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`WheelError`].
pub type Result<T> = std::result::Result<T, WheelError>;
