//! The `RECORD` installation manifest.
//!
//! `RECORD` lists every file in the wheel as `path,digest,length`, where
//! the digest is self-describing (`sha256=<base64-url-safe, unpadded>`) and
//! the length is a decimal byte count. The entry for `RECORD` itself
//! carries empty digest and length fields. Installers replay this manifest
//! to verify integrity after unpacking.

use crate::error::Result;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::Read;

/// Block size for streaming file hashing.
const HASH_BLOCK_SIZE: usize = 1 << 20;

/// One `RECORD` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Path relative to the wheel root.
    pub path: String,
    /// Self-describing digest string, empty for the self-reference entry.
    pub digest: String,
    /// Decimal byte count, empty for the self-reference entry.
    pub length: String,
}

impl RecordEntry {
    /// Entry for a hashed file.
    #[must_use]
    pub fn hashed(path: &str, digest: String, length: u64) -> Self {
        Self {
            path: path.to_owned(),
            digest,
            length: length.to_string(),
        }
    }

    /// The self-reference entry for the manifest file itself.
    #[must_use]
    pub fn self_reference(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            digest: String::new(),
            length: String::new(),
        }
    }
}

impl fmt::Display for RecordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.path, self.digest, self.length)
    }
}

/// Compute the content digest and byte length of a file.
///
/// Streams the file in fixed-size blocks so arbitrarily large binaries are
/// never loaded whole. The digest depends only on byte content, never on
/// filesystem metadata.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn rehash(path: &Utf8Path) -> Result<(String, u64)> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BLOCK_SIZE];
    let mut length: u64 = 0;
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        length += read as u64;
        hasher.update(&buffer[..read]);
    }
    let digest = format!("sha256={}", URL_SAFE_NO_PAD.encode(hasher.finalize()));
    Ok((digest, length))
}

/// Collect every regular file under `root`, as paths relative to `root`,
/// in sorted order.
///
/// Sorted order makes the manifest and the archive entry order
/// reproducible for identical input trees.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a path is not valid
/// UTF-8.
pub fn walk_files(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(root: &Utf8Path, dir: &Utf8Path, out: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir.as_std_path())? {
        let entry = entry?;
        let path = Utf8PathBuf::try_from(entry.path())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(root, &path, out)?;
        } else if file_type.is_file() {
            let relative = path
                .strip_prefix(root)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            out.push(relative.to_owned());
        }
    }
    Ok(())
}

/// Build the `RECORD` rows for an assembled wheel tree.
///
/// Every regular file under `tree` receives one hashed entry; the
/// manifest's own path (`record_path`, relative to `tree`) receives the
/// empty self-reference entry and must not yet exist on disk.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be read.
pub fn build_record(tree: &Utf8Path, record_path: &str) -> Result<Vec<RecordEntry>> {
    let mut entries = Vec::new();
    for relative in walk_files(tree)? {
        let (digest, length) = rehash(&tree.join(&relative))?;
        entries.push(RecordEntry::hashed(relative.as_str(), digest, length));
    }
    entries.push(RecordEntry::self_reference(record_path));
    Ok(entries)
}

/// Render `RECORD` rows to the CSV text form, one line per entry.
#[must_use]
pub fn render_record(entries: &[RecordEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}
