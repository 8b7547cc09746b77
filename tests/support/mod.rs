//! Shared fixtures for the pipeline integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::io::Write;
use std::process::Output;
use terraform_wheels::error::Result;
use terraform_wheels::exec::CommandExecutor;
use terraform_wheels::test_utils::{failure_output, success_output};

/// One recorded tool invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: Option<Utf8PathBuf>,
}

/// A `CommandExecutor` that simulates the external tools.
///
/// Downloads are served from an in-memory URL map and written to the
/// requested destination; the signature and checksum tools succeed unless
/// configured to fail. Every invocation is recorded so tests can assert
/// the exact call sequence.
pub struct ScriptedTools {
    remote_files: Vec<(String, Vec<u8>)>,
    fail_checksums: bool,
    invocations: RefCell<Vec<Invocation>>,
}

impl ScriptedTools {
    pub fn new(remote_files: Vec<(String, Vec<u8>)>) -> Self {
        Self {
            remote_files,
            fail_checksums: false,
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn with_checksum_failure(mut self) -> Self {
        self.fail_checksums = true;
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// The commands invoked, in order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.command.clone())
            .collect()
    }

    fn record(&self, command: &str, args: &[&str], working_dir: Option<&Utf8Path>) {
        self.invocations.borrow_mut().push(Invocation {
            command: command.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
            working_dir: working_dir.map(Utf8Path::to_path_buf),
        });
    }

    fn serve_download(&self, args: &[&str]) -> Output {
        if args.len() != 3 || args[1] != "-O" {
            return failure_output("unexpected transfer arguments");
        }
        let url = args[0];
        let dest = args[2];
        let Some((_, bytes)) = self.remote_files.iter().find(|(u, _)| u == url) else {
            return failure_output(&format!("ERROR 404: Not Found: {url}"));
        };
        std::fs::write(dest, bytes).expect("write simulated download");
        success_output()
    }
}

impl CommandExecutor for ScriptedTools {
    fn run(&self, command: &str, args: &[&str]) -> Result<Output> {
        self.record(command, args, None);
        match command {
            "wget" => Ok(self.serve_download(args)),
            other => Ok(failure_output(&format!("unexpected tool: {other}"))),
        }
    }

    fn run_in(&self, command: &str, args: &[&str], working_dir: &Utf8Path) -> Result<Output> {
        self.record(command, args, Some(working_dir));
        match command {
            "gpg" => Ok(success_output()),
            "shasum" if self.fail_checksums => Ok(failure_output(
                "shasum: WARNING: 1 computed checksum did NOT match",
            )),
            "shasum" => Ok(success_output()),
            other => Ok(failure_output(&format!("unexpected tool: {other}"))),
        }
    }
}

/// Build an in-memory release zip holding one binary entry.
pub fn release_zip_bytes(binary_name: &str, payload: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    writer.start_file(binary_name, options).expect("start entry");
    writer.write_all(payload).expect("write entry");
    writer.finish().expect("finish archive").into_inner()
}
