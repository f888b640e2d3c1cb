use std::io;
use std::path::PathBuf;

use invocation::CommandLineError;
use runner::RunnerError;
use thiserror::Error;

/// Exit code reported when the rsync executable cannot be found.
pub(crate) const MISSING_BINARY_EXIT_CODE: i32 = 127;

/// Failure of a preview run before rsync's own exit status is known.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument could not be decoded as UTF-8.
    #[error("argument '{0}' is not valid UTF-8")]
    NonUtf8Argument(String),
    /// The front-end's own options could not be parsed.
    #[error("{0}")]
    Usage(String),
    /// Neither an rsync command line nor `--input` was given.
    #[error(
        "no rsync command line given; usage: rsync-preview [OPTIONS] rsync [RSYNC-OPTIONS] SRC... DEST"
    )]
    MissingCommandLine,
    /// The `--input` file could not be read.
    #[error("failed to read input file '{}': {source}", .path.display())]
    InputFile {
        /// File named by `--input`.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The `--input` file does not hold a well-formed command line.
    #[error("invalid command line in '{}': {source}", .path.display())]
    CommandFile {
        /// File named by `--input`.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: CommandLineError,
    },
    /// The rsync command line would suppress the itemized report.
    #[error(
        "the rsync command line asks for quiet output (-q/--quiet), which hides the changes to preview; remove it or pass --skip-detect-quiet"
    )]
    QuietFlag,
    /// rsync could not be launched or its output could not be read.
    #[error(transparent)]
    Runner(#[from] RunnerError),
    /// Writing the change log failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Runner(error) if error.is_missing_binary() => MISSING_BINARY_EXIT_CODE,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_maps_to_127() {
        let error = CliError::from(RunnerError::MissingBinary {
            program: "rsync".to_owned(),
            diagnostic: "not found".to_owned(),
        });
        assert_eq!(error.exit_code(), 127);
        assert_eq!(error.to_string(), "not found");
    }

    #[test]
    fn other_failures_map_to_one() {
        assert_eq!(CliError::QuietFlag.exit_code(), 1);
        assert_eq!(CliError::MissingCommandLine.exit_code(), 1);
        assert_eq!(CliError::from(RunnerError::EmptyCommandLine).exit_code(), 1);
    }

    #[test]
    fn input_file_error_names_the_file() {
        let error = CliError::InputFile {
            path: PathBuf::from("missingFile"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(error.to_string().contains("'missingFile'"));
    }
}
