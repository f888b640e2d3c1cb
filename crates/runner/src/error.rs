use std::io;

use thiserror::Error;

/// Failure while launching rsync or reading its report.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The command line has no program token.
    #[error("the rsync command line is empty")]
    EmptyCommandLine,
    /// The program could not be located or is not executable.
    #[error("{diagnostic}")]
    MissingBinary {
        /// Program token as given.
        program: String,
        /// Human-readable explanation including how to fix it.
        diagnostic: String,
    },
    /// The operating system refused to start the program.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Reading the program's standard output failed.
    #[error("failed to read output of '{program}': {source}")]
    Read {
        /// Program whose output failed.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Waiting for the program to exit failed.
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        /// Program that could not be reaped.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl RunnerError {
    /// Reports whether the error means the rsync executable is unavailable.
    #[must_use]
    pub const fn is_missing_binary(&self) -> bool {
        matches!(self, Self::MissingBinary { .. })
    }
}
