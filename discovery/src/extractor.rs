//! Help-text capture.
//!
//! [`HelpSource`] is the seam between the parser and the target tool: the
//! parser asks for `help` and `help <subcommand>` and receives raw lines.
//! [`ProcessHelpSource`] runs the real executable; tests plug in canned
//! output instead.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::GenerateError;

/// Supplier of raw help output for a target tool.
pub trait HelpSource {
    /// Returns the help output produced for `args` (e.g. `["help", "run"]`),
    /// split into lines.
    fn help_lines(&self, args: &[&str]) -> Result<Vec<String>, GenerateError>;
}

impl<F> HelpSource for F
where
    F: Fn(&[&str]) -> Result<Vec<String>, GenerateError>,
{
    fn help_lines(&self, args: &[&str]) -> Result<Vec<String>, GenerateError> {
        self(args)
    }
}

/// Runs the target executable and captures its output.
///
/// Standard output and standard error share one pipe, so lines arrive in
/// the order the tool wrote them. The exit status is ignored: docker exits
/// non-zero for some help invocations while still printing usable text.
#[derive(Debug, Clone)]
pub struct ProcessHelpSource {
    executable: PathBuf,
}

impl ProcessHelpSource {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn spawn_error(&self, args: &[&str], source: io::Error) -> GenerateError {
        GenerateError::Spawn {
            command: format!("{} {}", self.executable.display(), args.join(" ")),
            source,
        }
    }
}

impl HelpSource for ProcessHelpSource {
    fn help_lines(&self, args: &[&str]) -> Result<Vec<String>, GenerateError> {
        let (mut reader, writer) = io::pipe().map_err(|err| self.spawn_error(args, err))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(|err| self.spawn_error(args, err))?;

        let mut command = Command::new(&self.executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);
        let spawned = command.spawn();
        // The command owns the parent's write ends; the reader only sees
        // EOF once they are closed.
        drop(command);
        let mut child = spawned.map_err(|err| self.spawn_error(args, err))?;

        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = child.wait().map_err(|err| self.spawn_error(args, err))?;
        read.map_err(|err| self.spawn_error(args, err))?;

        debug!(
            executable = %self.executable.display(),
            ?args,
            exit_code = ?status.code(),
            output_len = output.len(),
            "Captured help output"
        );

        Ok(output_lines(&output))
    }
}

fn output_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}
