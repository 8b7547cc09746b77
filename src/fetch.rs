//! Release file downloads via the external transfer tool.
//!
//! Each remote resource is fetched with a single blocking `wget`
//! invocation writing straight to its destination path. There is no retry
//! and no resumption; a failed transfer aborts the whole run.

use crate::error::{Result, WheelError};
use crate::exec::CommandExecutor;
use camino::Utf8Path;

/// The external transfer tool.
pub const DOWNLOAD_TOOL: &str = "wget";

/// Retrieve `url` to `dest` through the given executor.
///
/// # Errors
///
/// Returns [`WheelError::Download`] carrying the URL and the tool's
/// diagnostic output if the tool cannot be spawned or exits non-zero.
pub fn download(executor: &dyn CommandExecutor, url: &str, dest: &Utf8Path) -> Result<()> {
    log::debug!("fetching {url} -> {dest}");
    let output = executor
        .run(DOWNLOAD_TOOL, &[url, "-O", dest.as_str()])
        .map_err(|e| WheelError::Download {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let trimmed = stderr.trim();
        let reason = if trimmed.is_empty() {
            format!("transfer tool exited with {}", output.status)
        } else {
            trimmed.to_owned()
        };
        return Err(WheelError::Download {
            url: url.to_owned(),
            reason,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, success_output};
    use std::process::Output;

    fn expected_transfer(url: &str, dest: &str, result: Result<Output>) -> ExpectedCall {
        ExpectedCall {
            command: DOWNLOAD_TOOL,
            args: vec![url.to_owned(), "-O".to_owned(), dest.to_owned()],
            working_dir: None,
            result,
        }
    }

    #[test]
    fn invokes_transfer_tool_with_url_and_destination() {
        let executor = StubExecutor::new(vec![expected_transfer(
            "https://example.test/file.zip",
            "/build/file.zip",
            Ok(success_output()),
        )]);

        download(
            &executor,
            "https://example.test/file.zip",
            Utf8Path::new("/build/file.zip"),
        )
        .expect("download succeeds");
        executor.assert_finished();
    }

    #[test]
    fn nonzero_exit_maps_to_download_error_with_tool_stderr() {
        let executor = StubExecutor::new(vec![expected_transfer(
            "https://example.test/missing.zip",
            "/build/missing.zip",
            Ok(failure_output("ERROR 404: Not Found.")),
        )]);

        let err = download(
            &executor,
            "https://example.test/missing.zip",
            Utf8Path::new("/build/missing.zip"),
        )
        .expect_err("download must fail");

        assert!(matches!(
            &err,
            WheelError::Download { url, reason }
                if url == "https://example.test/missing.zip" && reason.contains("404")
        ));
    }

    #[test]
    fn empty_stderr_falls_back_to_exit_status() {
        let executor = StubExecutor::new(vec![expected_transfer(
            "https://example.test/file.zip",
            "/build/file.zip",
            Ok(failure_output("")),
        )]);

        let err = download(
            &executor,
            "https://example.test/file.zip",
            Utf8Path::new("/build/file.zip"),
        )
        .expect_err("download must fail");

        assert!(matches!(
            &err,
            WheelError::Download { reason, .. } if reason.contains("exited with")
        ));
    }

    #[test]
    fn spawn_failure_is_reported_as_download_error() {
        let executor = StubExecutor::new(vec![ExpectedCall {
            command: DOWNLOAD_TOOL,
            args: vec![
                "https://example.test/file.zip".to_owned(),
                "-O".to_owned(),
                "/build/file.zip".to_owned(),
            ],
            working_dir: None,
            result: Err(WheelError::Io(std::io::Error::other("command not found"))),
        }]);

        let err = download(
            &executor,
            "https://example.test/file.zip",
            Utf8Path::new("/build/file.zip"),
        )
        .expect_err("spawn failure must fail");

        assert!(matches!(
            &err,
            WheelError::Download { reason, .. } if reason.contains("command not found")
        ));
    }
}
