#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `runner` launches the rsync command line prepared by the `invocation`
//! crate and exposes its standard output as a stream of lines.
//!
//! # Design
//!
//! - [`RunnerConfig`] captures the environment the launcher depends on
//!   (`PATH` and the [`RSYNC_OVERRIDE_ENV`] override) as an explicit value.
//!   [`RunnerConfig::from_env`] reads it once at start-up.
//! - [`resolve_program`] turns the program token into an executable path,
//!   searching `PATH` the way the shell would.
//! - [`ReportStream`] owns the child process. It yields lossily decoded lines
//!   as they arrive and reports the exit status through
//!   [`ReportStream::finish`].
//!
//! # Invariants
//!
//! - Only stdout is captured. rsync's stderr is inherited so its own
//!   diagnostics reach the terminal unchanged; stdin is closed.
//! - A stream dropped before [`ReportStream::finish`] kills and reaps the
//!   child. No zombie processes outlive the stream.
//! - Exit statuses caused by signals map to `128 + signal`, capped at
//!   [`MAX_EXIT_CODE`].
//!
//! # Errors
//!
//! Every failure is a [`RunnerError`]. A program that cannot be found yields
//! [`RunnerError::MissingBinary`] whose message names the override variable.
//!
//! # Examples
//!
//! ```no_run
//! use runner::{ReportStream, RunnerConfig};
//!
//! let command_line = ["rsync", "-n", "-i", "-a", "src/", "dst/"];
//! let mut stream = ReportStream::spawn(&command_line, &RunnerConfig::from_env())?;
//! for line in stream.by_ref() {
//!     println!("{}", line?);
//! }
//! let exit_code = stream.finish()?;
//! assert_eq!(exit_code, 0);
//! # Ok::<(), runner::RunnerError>(())
//! ```

mod binary;
mod error;
mod stream;

pub use binary::{
    RSYNC_OVERRIDE_ENV, RunnerConfig, binary_candidates, describe_missing_binary, resolve_program,
};
pub use error::RunnerError;
pub use stream::{MAX_EXIT_CODE, ReportStream};
