//! GPG signature and SHA-256 checksum verification.
//!
//! Two independent checks, both fatal on failure. The detached signature
//! on the checksum manifest is verified first, against a pre-provisioned
//! trusted keyring only; once the manifest is authentic, the downloaded
//! archives are checked against it. Nothing is unpacked before both checks
//! pass.

use crate::error::{Result, WheelError};
use crate::exec::CommandExecutor;
use camino::Utf8Path;

/// The external signature verification tool.
pub const SIGNATURE_TOOL: &str = "gpg";

/// The external checksum tool.
pub const CHECKSUM_TOOL: &str = "shasum";

/// Verify the detached signature over the checksum manifest.
///
/// Runs the signature tool with only the provided keyring trusted, in the
/// workspace directory.
///
/// # Errors
///
/// Returns [`WheelError::SignatureVerification`] if the tool cannot be
/// spawned or reports anything but success. There is no partial trust.
pub fn verify_signature(
    executor: &dyn CommandExecutor,
    keyring: &Utf8Path,
    signature: &Utf8Path,
    manifest: &Utf8Path,
    working_dir: &Utf8Path,
) -> Result<()> {
    let output = executor
        .run_in(
            SIGNATURE_TOOL,
            &[
                "--no-default-keyring",
                "--keyring",
                keyring.as_str(),
                "--verify",
                signature.as_str(),
                manifest.as_str(),
            ],
            working_dir,
        )
        .map_err(|e| WheelError::SignatureVerification {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(WheelError::SignatureVerification {
            reason: tool_diagnostic(&output.stderr, &output.status),
        });
    }

    Ok(())
}

/// Verify downloaded archives against the authenticated manifest.
///
/// Runs the checksum tool in the workspace directory so the file names
/// listed in the manifest resolve; entries for archives that were not
/// downloaded are ignored, which supports building a subset of platforms.
///
/// # Errors
///
/// Returns [`WheelError::ChecksumMismatch`] if the tool cannot be spawned
/// or any present file fails its checksum.
pub fn verify_checksums(
    executor: &dyn CommandExecutor,
    manifest: &Utf8Path,
    working_dir: &Utf8Path,
) -> Result<()> {
    let output = executor
        .run_in(
            CHECKSUM_TOOL,
            &[
                "--algorithm",
                "256",
                "--ignore-missing",
                "--check",
                manifest.as_str(),
            ],
            working_dir,
        )
        .map_err(|e| WheelError::ChecksumMismatch {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(WheelError::ChecksumMismatch {
            reason: tool_diagnostic(&output.stderr, &output.status),
        });
    }

    Ok(())
}

/// The tool's trimmed stderr, or its exit status when stderr is empty.
fn tool_diagnostic(stderr: &[u8], status: &std::process::ExitStatus) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!("tool exited with {status}")
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, success_output};
    use camino::Utf8PathBuf;

    fn workspace() -> Utf8PathBuf {
        Utf8PathBuf::from("/build")
    }

    #[test]
    fn signature_check_pins_keyring_and_workspace() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            command: SIGNATURE_TOOL,
            args: vec![
                "--no-default-keyring".to_owned(),
                "--keyring".to_owned(),
                "/work/hashicorp.gpg".to_owned(),
                "--verify".to_owned(),
                "/build/terraform_1.5.7_SHA256SUMS.sig".to_owned(),
                "/build/terraform_1.5.7_SHA256SUMS".to_owned(),
            ],
            working_dir: Some(workspace()),
            result: Ok(success_output()),
        }]);

        verify_signature(
            &executor,
            Utf8Path::new("/work/hashicorp.gpg"),
            Utf8Path::new("/build/terraform_1.5.7_SHA256SUMS.sig"),
            Utf8Path::new("/build/terraform_1.5.7_SHA256SUMS"),
            &workspace(),
        )
        .expect("signature verifies");
        executor.assert_finished();
    }

    #[test]
    fn signature_failure_surfaces_tool_diagnostic() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            command: SIGNATURE_TOOL,
            args: vec![
                "--no-default-keyring".to_owned(),
                "--keyring".to_owned(),
                "/work/hashicorp.gpg".to_owned(),
                "--verify".to_owned(),
                "/build/sums.sig".to_owned(),
                "/build/sums".to_owned(),
            ],
            working_dir: Some(workspace()),
            result: Ok(failure_output("gpg: BAD signature from unknown key")),
        }]);

        let err = verify_signature(
            &executor,
            Utf8Path::new("/work/hashicorp.gpg"),
            Utf8Path::new("/build/sums.sig"),
            Utf8Path::new("/build/sums"),
            &workspace(),
        )
        .expect_err("bad signature must fail");

        assert!(matches!(
            &err,
            WheelError::SignatureVerification { reason } if reason.contains("BAD signature")
        ));
    }

    #[test]
    fn checksum_check_ignores_missing_files_and_runs_in_workspace() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            command: CHECKSUM_TOOL,
            args: vec![
                "--algorithm".to_owned(),
                "256".to_owned(),
                "--ignore-missing".to_owned(),
                "--check".to_owned(),
                "/build/terraform_1.5.7_SHA256SUMS".to_owned(),
            ],
            working_dir: Some(workspace()),
            result: Ok(success_output()),
        }]);

        verify_checksums(
            &executor,
            Utf8Path::new("/build/terraform_1.5.7_SHA256SUMS"),
            &workspace(),
        )
        .expect("checksums verify");
        executor.assert_finished();
    }

    #[test]
    fn checksum_mismatch_is_fatal() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            command: CHECKSUM_TOOL,
            args: vec![
                "--algorithm".to_owned(),
                "256".to_owned(),
                "--ignore-missing".to_owned(),
                "--check".to_owned(),
                "/build/sums".to_owned(),
            ],
            working_dir: Some(workspace()),
            result: Ok(failure_output(
                "terraform_1.5.7_linux_amd64.zip: FAILED\nshasum: WARNING: 1 computed checksum did NOT match",
            )),
        }]);

        let err = verify_checksums(&executor, Utf8Path::new("/build/sums"), &workspace())
            .expect_err("mismatch must fail");

        assert!(matches!(
            &err,
            WheelError::ChecksumMismatch { reason } if reason.contains("did NOT match")
        ));
    }
}
