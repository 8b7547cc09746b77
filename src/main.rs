//! Terraform wheel builder CLI entrypoint.
//!
//! This binary downloads a Terraform release, verifies its signature and
//! checksums, and repackages the binaries as Python wheels, one per
//! supported platform.

use clap::Parser;
use std::io::Write;
use terraform_wheels::cli::Cli;
use terraform_wheels::config::BuildConfig;
use terraform_wheels::error::Result;
use terraform_wheels::exec::SystemCommandExecutor;
use terraform_wheels::output::{DryRunInfo, success_message, write_stderr_line};
use terraform_wheels::pipeline::{PipelineContext, run_pipeline};
use terraform_wheels::version::ReleaseTag;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = BuildConfig::from_cli(cli)?;

    // Dry-run mode: show what would be done without side effects.
    if cli.dry_run {
        return run_dry(&config, stderr);
    }

    let executor = SystemCommandExecutor;
    let context = PipelineContext {
        config: &config,
        executor: &executor,
        quiet: cli.quiet,
    };
    let wheels = run_pipeline(&context, stderr)?;

    if !cli.quiet {
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, success_message(wheels.len(), &config.build_dir));
        for wheel in &wheels {
            write_stderr_line(stderr, format!("  - {wheel}"));
        }
    }

    Ok(())
}

/// Prints the resolved configuration without downloading or building.
fn run_dry(config: &BuildConfig, stderr: &mut dyn Write) -> Result<()> {
    let release_tag = ReleaseTag::parse(&config.tag)?;
    let package_version = release_tag.package_version();
    let terraform_version = release_tag.terraform_version();
    let info = DryRunInfo {
        tag: &config.tag,
        package_version: &package_version,
        terraform_version: &terraform_version,
        build_dir: &config.build_dir,
        platforms: &config.platforms,
    };
    write_stderr_line(stderr, info.display_text());
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraform_wheels::error::WheelError;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = WheelError::UnknownPlatform {
            tag: "beos_ppc".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("unknown platform tag beos_ppc"));
    }

    #[test]
    fn dry_run_reports_configuration_without_touching_the_filesystem() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = camino::Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf-8 path");
        let cli = Cli {
            tag: Some("1.5.7-rc0".to_owned()),
            ..Cli::default()
        };
        let config = BuildConfig::resolve(&cli, &root).expect("config resolves");

        let mut stderr = Vec::new();
        run_dry(&config, &mut stderr).expect("dry run succeeds");

        let text = String::from_utf8(stderr).expect("utf-8 output");
        assert!(text.contains("Package version: 1.5.7.rc0"));
        assert!(!config.build_dir.exists());
    }
}
