//! Per-platform wheel assembly.
//!
//! Turns one verified upstream release archive into one wheel: unpack,
//! lay out the `.data`/`.dist-info` tree, stage the binary and metadata,
//! write the `RECORD` manifest, and compress the tree with deflate at
//! maximum level.

use super::metadata::{HeaderDocument, wheel_document};
use super::naming::WheelId;
use super::record::{build_record, render_record, walk_files};
use crate::error::{Result, WheelError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use zip::write::SimpleFileOptions;

/// Name of the upstream binary inside the release archive.
const BINARY_NAME: &str = "terraform";

/// Windows name of the upstream binary.
const BINARY_NAME_WINDOWS: &str = "terraform.exe";

/// Input parameters for [`assemble_wheel`].
///
/// Groups all required inputs so the function signature stays small; the
/// identity and metadata fields are shared across platforms while the
/// platform tag and archive vary per call.
#[derive(Debug)]
pub struct AssembleParams<'a> {
    /// Distribution/version identity shared by all wheels of the run.
    pub wheel_id: &'a WheelId,
    /// The wheel platform tag being assembled.
    pub platform_tag: &'a str,
    /// Path to the verified upstream release zip.
    pub archive_path: &'a Utf8Path,
    /// Workspace directory receiving the tree and the final wheel.
    pub build_dir: &'a Utf8Path,
    /// License file copied into `dist-info`.
    pub license_path: &'a Utf8Path,
    /// Rendered-once package metadata document.
    pub metadata: &'a HeaderDocument,
}

/// Assemble one platform's wheel and return its path.
///
/// # Errors
///
/// Returns an error on any filesystem or archive failure, including a
/// release archive with no Terraform binary. Failures leave a partial tree
/// in the workspace; nothing is rolled back.
pub fn assemble_wheel(params: &AssembleParams<'_>) -> Result<Utf8PathBuf> {
    let scratch = params.archive_path.with_extension("");
    extract_zip(params.archive_path, &scratch)?;

    let tree = params
        .build_dir
        .join(params.wheel_id.file_stem(params.platform_tag));
    let scripts_dir = tree.join(params.wheel_id.data_dir()).join("scripts");
    let dist_info = tree.join(params.wheel_id.dist_info_dir());
    fs::create_dir_all(scripts_dir.as_std_path())?;
    fs::create_dir_all(dist_info.as_std_path())?;

    let source_binary = locate_binary(&scratch)?;
    let binary_name = source_binary.file_name().unwrap_or(BINARY_NAME);
    let staged_binary = scripts_dir.join(binary_name);
    fs::copy(source_binary.as_std_path(), staged_binary.as_std_path())?;
    make_executable(&staged_binary)?;

    let license_name = params.license_path.file_name().unwrap_or("LICENSE");
    fs::copy(
        params.license_path.as_std_path(),
        dist_info.join(license_name).as_std_path(),
    )?;

    fs::write(
        dist_info.join("METADATA").as_std_path(),
        params.metadata.render(),
    )?;
    fs::write(
        dist_info.join("WHEEL").as_std_path(),
        wheel_document(params.platform_tag).render(),
    )?;

    let record_path = format!("{}/RECORD", params.wheel_id.dist_info_dir());
    let entries = build_record(&tree, &record_path)?;
    fs::write(tree.join(&record_path).as_std_path(), render_record(&entries))?;

    let wheel_path = params
        .build_dir
        .join(params.wheel_id.file_name(params.platform_tag));
    compress_tree(&tree, &wheel_path)?;
    log::debug!("assembled {wheel_path}");
    Ok(wheel_path)
}

/// Unpack a zip archive into `dest_dir`, rejecting entries that would
/// escape it.
///
/// # Errors
///
/// Returns [`WheelError::UnsafeArchiveEntry`] for traversal attempts and
/// propagates archive or I/O failures.
pub fn extract_zip(archive_path: &Utf8Path, dest_dir: &Utf8Path) -> Result<()> {
    let file = fs::File::open(archive_path.as_std_path())?;
    let mut archive = zip::ZipArchive::new(file)?;
    fs::create_dir_all(dest_dir.as_std_path())?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(WheelError::UnsafeArchiveEntry {
                name: entry.name().to_owned(),
            });
        };
        let dest_path = dest_dir.as_std_path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&dest_path)?;
        std::io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(())
}

/// Locate the Terraform binary inside an unpacked release archive.
///
/// The probe tries the bare name first and falls back to the `.exe` form.
/// Selection is by filesystem existence, not by platform tag: upstream
/// names the binary by its build target, independent of the wheel tag.
fn locate_binary(dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let bare = dir.join(BINARY_NAME);
    if bare.exists() {
        return Ok(bare);
    }
    let windows = dir.join(BINARY_NAME_WINDOWS);
    if windows.exists() {
        return Ok(windows);
    }
    Err(WheelError::BinaryNotFound {
        dir: dir.to_owned(),
    })
}

/// Set owner rwx, group/other rx on the staged binary.
#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path.as_std_path(), fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// No permission bits to set on non-Unix filesystems.
#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}

/// Compress an assembled tree into a wheel archive.
///
/// Entries are named by their path relative to the tree root, added in
/// sorted order, deflate-compressed at maximum level.
fn compress_tree(tree: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    let file = fs::File::create(dest.as_std_path())?;
    let mut archive = zip::ZipWriter::new(file);

    for relative in walk_files(tree)? {
        let source = tree.join(&relative);
        archive.start_file(relative.as_str(), entry_options(&source)?)?;
        let mut input = fs::File::open(source.as_std_path())?;
        std::io::copy(&mut input, &mut archive)?;
    }

    archive.finish()?;
    Ok(())
}

fn base_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(9))
}

/// Entry options carrying the source file's permission bits.
#[cfg(unix)]
fn entry_options(source: &Utf8Path) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(source.as_std_path())?.permissions().mode();
    Ok(base_options().unix_permissions(mode & 0o777))
}

/// Entry options with default permissions on non-Unix hosts.
#[cfg(not(unix))]
fn entry_options(_source: &Utf8Path) -> Result<SimpleFileOptions> {
    Ok(base_options())
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
