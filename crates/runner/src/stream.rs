use std::io::{self, BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};

#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;

use crate::binary::{RSYNC_OVERRIDE_ENV, RunnerConfig, describe_missing_binary, resolve_program};
use crate::error::RunnerError;

/// Highest exit code reported for a child process.
pub const MAX_EXIT_CODE: i32 = 255;

const TARGET: &str = "rsync_preview::runner";

/// A running rsync process whose standard output is read line by line.
///
/// Iterating yields each output line without its line terminator. Invalid
/// UTF-8 is replaced rather than rejected so that unusual file names never
/// abort the report.
#[derive(Debug)]
pub struct ReportStream {
    program: String,
    child: Child,
    stdout: Option<BufReader<ChildStdout>>,
    buffer: Vec<u8>,
    reaped: bool,
}

impl ReportStream {
    /// Launches `command_line[0]` with the remaining tokens as arguments.
    ///
    /// # Errors
    ///
    /// Fails with [`RunnerError::EmptyCommandLine`] for an empty command line,
    /// [`RunnerError::MissingBinary`] when the program cannot be found, and
    /// [`RunnerError::Spawn`] when the operating system refuses to start it.
    pub fn spawn<S: AsRef<str>>(
        command_line: &[S],
        config: &RunnerConfig,
    ) -> Result<Self, RunnerError> {
        let Some((program, arguments)) = command_line.split_first() else {
            return Err(RunnerError::EmptyCommandLine);
        };
        let program = program.as_ref();
        let executable = resolve_program(program, config)?;

        tracing::debug!(
            target: TARGET,
            executable = %executable.display(),
            arguments = arguments.len(),
            "launching rsync"
        );

        let mut child = Command::new(&executable)
            .args(arguments.iter().map(|argument| argument.as_ref()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    RunnerError::MissingBinary {
                        program: program.to_owned(),
                        diagnostic: describe_missing_binary(
                            executable.as_os_str(),
                            RSYNC_OVERRIDE_ENV,
                        ),
                    }
                } else {
                    RunnerError::Spawn {
                        program: program.to_owned(),
                        source,
                    }
                }
            })?;

        let stdout = child.stdout.take().map(BufReader::new);
        Ok(Self {
            program: program.to_owned(),
            child,
            stdout,
            buffer: Vec::new(),
            reaped: false,
        })
    }

    /// Returns the program token the stream was started with.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Closes the output pipe, waits for the process and returns its exit code.
    ///
    /// A process killed by a signal reports `128 + signal`, capped at
    /// [`MAX_EXIT_CODE`].
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Wait`] when the process cannot be reaped.
    pub fn finish(mut self) -> Result<i32, RunnerError> {
        self.stdout = None;
        let status = self.child.wait().map_err(|source| RunnerError::Wait {
            program: self.program.clone(),
            source,
        })?;
        self.reaped = true;

        let code = exit_code(status);
        tracing::debug!(target: TARGET, code, "rsync exited");
        Ok(code)
    }

    fn read_line(&mut self) -> Option<io::Result<String>> {
        let reader = self.stdout.as_mut()?;
        self.buffer.clear();
        match reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.stdout = None;
                None
            }
            Ok(_) => {
                let mut line = self.buffer.as_slice();
                if let Some(stripped) = line.strip_suffix(b"\n") {
                    line = stripped;
                }
                if let Some(stripped) = line.strip_suffix(b"\r") {
                    line = stripped;
                }
                Some(Ok(String::from_utf8_lossy(line).into_owned()))
            }
            Err(error) => {
                self.stdout = None;
                Some(Err(error))
            }
        }
    }
}

impl Iterator for ReportStream {
    type Item = Result<String, RunnerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().map(|line| {
            line.map_err(|source| RunnerError::Read {
                program: self.program.clone(),
                source,
            })
        })
    }
}

impl Drop for ReportStream {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        self.stdout = None;
        if let Err(error) = self.child.kill() {
            tracing::debug!(target: TARGET, %error, "rsync already exited");
        }
        if let Err(error) = self.child.wait() {
            tracing::warn!(target: TARGET, %error, "failed to reap rsync");
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            return (128 + signal).min(MAX_EXIT_CODE);
        }
    }

    MAX_EXIT_CODE
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> ReportStream {
        ReportStream::spawn(&["/bin/sh", "-c", script], &RunnerConfig::default())
            .expect("spawn /bin/sh")
    }

    #[test]
    fn yields_lines_without_terminators() {
        let mut stream = shell("printf 'one\\ntwo\\r\\nthree'");
        let lines: Vec<String> = stream.by_ref().collect::<Result<_, _>>().expect("read");
        assert_eq!(lines, ["one", "two", "three"]);
        assert_eq!(stream.finish().expect("finish"), 0);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut stream = shell("printf '>f+++++++++ caf\\351\\n'");
        let line = stream.next().expect("one line").expect("read");
        assert_eq!(line, ">f+++++++++ caf\u{fffd}");
    }

    #[test]
    fn exit_code_is_passed_through() {
        let mut stream = shell("echo partial; exit 23");
        assert_eq!(stream.by_ref().count(), 1);
        assert_eq!(stream.finish().expect("finish"), 23);
    }

    #[test]
    fn signal_maps_above_128() {
        let stream = shell("kill -TERM $$");
        assert_eq!(stream.finish().expect("finish"), 128 + 15);
    }

    #[test]
    fn dropping_early_terminates_the_child() {
        let mut stream = shell("echo first; exec sleep 30");
        assert_eq!(stream.next().expect("line").expect("read"), "first");
        drop(stream);
    }

    #[test]
    fn empty_command_line_is_rejected() {
        let error = ReportStream::spawn::<&str>(&[], &RunnerConfig::default()).expect_err("empty");
        assert!(matches!(error, RunnerError::EmptyCommandLine));
    }

    #[test]
    fn missing_explicit_program_reports_missing_binary() {
        let error = ReportStream::spawn(&["/nonexistent/dir/rsync"], &RunnerConfig::default())
            .expect_err("missing");
        assert!(error.is_missing_binary());
    }
}
