//! Sequential fetch/verify/assemble orchestration.
//!
//! The run is strictly linear: resolve versions, check required inputs,
//! build the shared metadata document, fetch the checksum manifest and its
//! signature, authenticate the manifest, fetch every platform archive,
//! check the archives against the manifest, then assemble one wheel per
//! platform. The first failure aborts the whole run; nothing is retried
//! and nothing is rolled back.

use crate::config::BuildConfig;
use crate::error::{Result, WheelError};
use crate::exec::CommandExecutor;
use crate::fetch;
use crate::output::write_stderr_line;
use crate::platforms::PlatformEntry;
use crate::release;
use crate::verify;
use crate::version::ReleaseTag;
use crate::wheel::assemble::{AssembleParams, assemble_wheel};
use crate::wheel::metadata::{PACKAGE_NAME, package_metadata};
use crate::wheel::naming::WheelId;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;

/// Context for one packaging run.
pub struct PipelineContext<'a> {
    /// Resolved configuration.
    pub config: &'a BuildConfig,
    /// Invoker for the external download, signature, and checksum tools.
    pub executor: &'a dyn CommandExecutor,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Run the full packaging pipeline and return the built wheel paths, one
/// per platform table entry, in table order.
///
/// # Errors
///
/// Returns the first failure encountered: a malformed tag, a missing
/// input file, a failed download, a rejected signature or checksum, or a
/// filesystem error during assembly.
pub fn run_pipeline(
    context: &PipelineContext<'_>,
    stderr: &mut dyn Write,
) -> Result<Vec<Utf8PathBuf>> {
    let config = context.config;

    // Step 1: resolve versions from the release tag.
    let release_tag = ReleaseTag::parse(&config.tag)?;
    let package_version = release_tag.package_version();
    let terraform_version = release_tag.terraform_version();
    log::debug!(
        "tag {} -> package version {package_version}, terraform {terraform_version}",
        config.tag
    );

    // Step 2: required inputs must exist before anything is downloaded.
    let license_path = require_input(&config.license_path, "license file")?;
    let readme_path = require_input(&config.readme_path, "readme file")?;
    let keyring_path = require_input(&config.keyring_path, "trusted keyring")?;

    // Step 3: the package metadata document, shared by every platform.
    let readme = fs::read_to_string(readme_path.as_std_path())?;
    let license_name = license_path.file_name().unwrap_or("LICENSE");
    let metadata = package_metadata(&release_tag, license_name, &readme);
    let wheel_id = WheelId::new(PACKAGE_NAME, &package_version);

    // Step 4: the workspace; creating it is idempotent.
    fs::create_dir_all(config.build_dir.as_std_path())?;

    // Step 5: fetch the checksum manifest and its detached signature.
    let sums_url = release::sha256sums_url(&terraform_version);
    let sig_url = release::signature_url(&terraform_version);
    let sums_path = config.build_dir.join(release::remote_file_name(&sums_url));
    let sig_path = config.build_dir.join(release::remote_file_name(&sig_url));
    if !context.quiet {
        write_stderr_line(stderr, format!("Fetching {sums_url}..."));
    }
    fetch::download(context.executor, &sums_url, &sums_path)?;
    if !context.quiet {
        write_stderr_line(stderr, format!("Fetching {sig_url}..."));
    }
    fetch::download(context.executor, &sig_url, &sig_path)?;

    // Step 6: authenticate the manifest before trusting any checksum.
    if !context.quiet {
        write_stderr_line(stderr, "Verifying manifest signature...");
    }
    verify::verify_signature(
        context.executor,
        keyring_path,
        &sig_path,
        &sums_path,
        &config.build_dir,
    )?;

    // Step 7: fetch the release archive for every platform, in table order.
    let mut downloads: Vec<(PlatformEntry, Utf8PathBuf)> = Vec::new();
    for entry in config.platforms.iter() {
        let url = release::archive_url(&terraform_version, entry.arch);
        let dest = config.build_dir.join(release::remote_file_name(&url));
        if !context.quiet {
            write_stderr_line(stderr, format!("Fetching {url}..."));
        }
        fetch::download(context.executor, &url, &dest)?;
        downloads.push((*entry, dest));
    }

    // Step 8: check the downloaded archives against the manifest.
    if !context.quiet {
        write_stderr_line(stderr, "Verifying archive checksums...");
    }
    verify::verify_checksums(context.executor, &sums_path, &config.build_dir)?;

    // Step 9: assemble one wheel per platform.
    let mut wheels = Vec::new();
    for (entry, archive_path) in &downloads {
        if !context.quiet {
            write_stderr_line(stderr, format!("Assembling wheel for {}...", entry.tag));
        }
        let params = AssembleParams {
            wheel_id: &wheel_id,
            platform_tag: entry.tag,
            archive_path,
            build_dir: &config.build_dir,
            license_path,
            metadata: &metadata,
        };
        wheels.push(assemble_wheel(&params)?);
    }

    Ok(wheels)
}

/// Check that a required input file exists.
fn require_input<'a>(path: &'a Utf8Path, what: &'static str) -> Result<&'a Utf8Path> {
    if path.exists() {
        Ok(path)
    } else {
        Err(WheelError::MissingInput {
            what,
            path: path.to_owned(),
        })
    }
}
