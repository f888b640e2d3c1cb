#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `rsync-preview` front-end. It takes an rsync command
//! line, turns it into a dry run with itemized output, runs it, and prints the
//! resulting change log:
//!
//! ```text
//! rsync command line: rsync -n -i -a --delete src/ dst/
//! M ./
//! D surplus file
//! A new dir/
//! ```
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error, and returns the process exit code. The pipeline is:
//!
//! 1. split the arguments at the first `rsync` token
//!    ([`invocation::split_arguments`]) and parse the front-end's own options
//!    with `clap`;
//! 2. read the command line from `--input FILE` when given;
//! 3. refuse quiet runs unless `--skip-detect-quiet` is set, then add `-n` and
//!    `-i` ([`invocation::ensure_dry_run`]);
//! 4. stream rsync's output through [`itemize::try_change_events`] and print
//!    each event as `<code> <path>`.
//!
//! # Invariants
//!
//! - `--help` and `--version` never launch rsync.
//! - Nothing is spawned when the command line carries a quiet flag and
//!   `--skip-detect-quiet` is absent.
//! - The spawned command is always a dry run.
//!
//! # Errors
//!
//! Own failures are rendered as `rsync-preview error: <message>` on stderr and
//! map to exit code `1`, or `127` when rsync cannot be found. Otherwise rsync's
//! exit code is returned unchanged.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["rsync-preview", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("rsync-preview "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use runner::{MAX_EXIT_CODE, RunnerConfig};

mod arguments;
mod error;
mod execute;
mod report;

pub use error::CliError;

/// Name the front-end reports in banners and diagnostics.
pub const PROGRAM_NAME: &str = "rsync-preview";

/// Version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The first argument is the front-end's own program name and is ignored.
/// The environment is consulted through [`RunnerConfig::from_env`].
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_with_config(arguments, stdout, stderr, &RunnerConfig::from_env())
}

/// Like [`run`], with an explicit launcher environment.
pub fn run_with_config<I, S, Out, Err>(
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
    config: &RunnerConfig,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match execute::execute(arguments, stdout, stderr, config) {
        Ok(code) => code,
        Err(error) => {
            if let Err(write_error) = writeln!(stderr, "{PROGRAM_NAME} error: {error}") {
                tracing::error!(
                    target: "rsync_preview::cli",
                    %error,
                    %write_error,
                    "failed to report error on stderr"
                );
            }
            error.exit_code()
        }
    }
}

/// Converts a numeric exit code into an [`ExitCode`], clamping it to the
/// range a process can report.
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(clamped as u8)
}
