use std::collections::HashSet;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use invocation::PROGRAM_NAME;

use crate::error::RunnerError;

/// Environment variable naming the rsync executable to launch for a bare
/// `rsync` program token.
pub const RSYNC_OVERRIDE_ENV: &str = "RSYNC_PREVIEW_RSYNC";

const TARGET: &str = "rsync_preview::runner";

/// Environment the launcher depends on.
///
/// Tests build it directly with [`RunnerConfig::with_path`] and
/// [`RunnerConfig::with_rsync_override`] instead of mutating the process
/// environment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunnerConfig {
    rsync_override: Option<OsString>,
    path: Option<OsString>,
}

impl RunnerConfig {
    /// Captures `PATH` and [`RSYNC_OVERRIDE_ENV`] from the process environment.
    ///
    /// An empty override is treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            rsync_override: env::var_os(RSYNC_OVERRIDE_ENV).filter(|value| !value.is_empty()),
            path: env::var_os("PATH"),
        }
    }

    /// Replaces the rsync override.
    #[must_use]
    pub fn with_rsync_override(mut self, program: impl Into<OsString>) -> Self {
        self.rsync_override = Some(program.into());
        self
    }

    /// Replaces the search path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<OsString>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the rsync override, if any.
    #[must_use]
    pub fn rsync_override(&self) -> Option<&OsStr> {
        self.rsync_override.as_deref()
    }

    /// Returns the search path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&OsStr> {
        self.path.as_deref()
    }
}

/// Lists the paths at which `program` would be looked up.
///
/// A program containing a directory component is its own single candidate.
/// Otherwise every `PATH` entry contributes one candidate, in order and
/// without duplicates; an empty entry stands for the current directory.
#[must_use]
pub fn binary_candidates(program: &OsStr, search_path: Option<&OsStr>) -> Vec<PathBuf> {
    let program = Path::new(program);
    if has_directory_component(program) {
        return vec![program.to_path_buf()];
    }

    let Some(search_path) = search_path else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    env::split_paths(search_path)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                program.to_path_buf()
            } else {
                dir.join(program)
            }
        })
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

/// Resolves the program token of a command line to the executable to launch.
///
/// Tokens with a directory component are used as given. A bare `rsync` is
/// replaced by the configured override when one is set. Anything else is
/// looked up on the configured `PATH`.
///
/// # Errors
///
/// Returns [`RunnerError::MissingBinary`] when no executable candidate exists.
pub fn resolve_program(program: &str, config: &RunnerConfig) -> Result<PathBuf, RunnerError> {
    let requested = match config.rsync_override() {
        Some(replacement) if program == PROGRAM_NAME => {
            tracing::debug!(
                target: TARGET,
                replacement = %Path::new(replacement).display(),
                "using rsync override from {RSYNC_OVERRIDE_ENV}"
            );
            replacement
        }
        _ => OsStr::new(program),
    };

    if has_directory_component(Path::new(requested)) {
        return Ok(PathBuf::from(requested));
    }

    binary_candidates(requested, config.path())
        .into_iter()
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| RunnerError::MissingBinary {
            program: program.to_owned(),
            diagnostic: describe_missing_binary(requested, RSYNC_OVERRIDE_ENV),
        })
}

/// Explains that `program` cannot be launched and how to point at it.
#[must_use]
pub fn describe_missing_binary(program: &OsStr, override_env: &str) -> String {
    format!(
        "rsync binary '{}' is not available on PATH or is not executable; install rsync or set {override_env} to an explicit path",
        Path::new(program).display()
    )
}

fn has_directory_component(path: &Path) -> bool {
    path.is_absolute() || path.components().count() > 1
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_follow_path_order_without_duplicates() {
        let search = env::join_paths(["/opt/bin", "/usr/bin", "/opt/bin"]).expect("join");
        let candidates = binary_candidates(OsStr::new("rsync"), Some(&search));
        assert_eq!(
            candidates,
            [
                PathBuf::from("/opt/bin/rsync"),
                PathBuf::from("/usr/bin/rsync")
            ]
        );
    }

    #[test]
    fn empty_path_entry_means_current_directory() {
        let search = env::join_paths(["", "/usr/bin"]).expect("join");
        let candidates = binary_candidates(OsStr::new("rsync"), Some(&search));
        assert_eq!(candidates[0], PathBuf::from("rsync"));
    }

    #[test]
    fn explicit_path_is_its_own_candidate() {
        let candidates = binary_candidates(OsStr::new("./bin/rsync"), Some(OsStr::new("/usr/bin")));
        assert_eq!(candidates, [PathBuf::from("./bin/rsync")]);
    }

    #[test]
    fn missing_path_yields_no_candidates() {
        assert!(binary_candidates(OsStr::new("rsync"), None).is_empty());
    }

    #[test]
    fn explicit_program_path_is_used_verbatim() {
        let config = RunnerConfig::default().with_rsync_override("/elsewhere/rsync");
        let resolved = resolve_program("/usr/local/bin/rsync", &config).expect("resolves");
        assert_eq!(resolved, PathBuf::from("/usr/local/bin/rsync"));
    }

    #[test]
    fn override_replaces_bare_rsync() {
        let config = RunnerConfig::default().with_rsync_override("/opt/rsync/bin/rsync");
        let resolved = resolve_program("rsync", &config).expect("resolves");
        assert_eq!(resolved, PathBuf::from("/opt/rsync/bin/rsync"));
    }

    #[test]
    fn missing_binary_names_override_variable() {
        let config = RunnerConfig::default().with_path("");
        let error = resolve_program("rsync-does-not-exist", &config).expect_err("missing");
        assert!(error.is_missing_binary());
        let message = error.to_string();
        assert!(message.contains("'rsync-does-not-exist'"), "{message}");
        assert!(message.contains(RSYNC_OVERRIDE_ENV), "{message}");
    }

    #[test]
    fn describe_mentions_install_hint() {
        let text = describe_missing_binary(OsStr::new("/usr/bin/rsync"), "VAR");
        assert!(text.contains("/usr/bin/rsync"));
        assert!(text.contains("install rsync or set VAR to an explicit path"));
    }

    #[cfg(unix)]
    #[test]
    fn lookup_skips_non_executable_candidates() {
        use std::fs;

        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        let plain = first.path().join("rsync");
        fs::write(&plain, "not a program").expect("write");
        let runnable = second.path().join("rsync");
        fs::write(&runnable, "#!/bin/sh\n").expect("write");
        let mut permissions = fs::metadata(&runnable).expect("metadata").permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&runnable, permissions).expect("chmod");

        let search = env::join_paths([first.path(), second.path()]).expect("join");
        let config = RunnerConfig::default().with_path(search);
        assert_eq!(resolve_program("rsync", &config).expect("resolves"), runnable);
    }
}
