//! Forces a command line into dry-run, itemized-report mode.

use crate::options::{OptionUse, scan_options};

/// Short option requesting a dry run.
#[doc(alias = "--dry-run")]
pub const DRY_RUN_FLAG: &str = "-n";

/// Short option requesting the itemized change report.
#[doc(alias = "--itemize-changes")]
pub const ITEMIZE_FLAG: &str = "-i";

const DRY_RUN_LONG: &str = "dry-run";
const ITEMIZE_LONG: &str = "itemize-changes";

fn is_dry_run(option: &OptionUse<'_>) -> bool {
    option.is('n', DRY_RUN_LONG)
}

fn is_itemize(option: &OptionUse<'_>) -> bool {
    option.is('i', ITEMIZE_LONG)
}

/// Reports whether the command line already asks rsync for a dry run.
///
/// Token 0 is the program and is ignored, as is everything after `--`.
/// Letters inside option values (`-essh -n`, `--exclude -n`) do not count.
#[must_use]
pub fn requests_dry_run<S: AsRef<str>>(tokens: &[S]) -> bool {
    scan_options(tokens).iter().any(is_dry_run)
}

/// Reports whether the command line already asks rsync for itemized output.
#[must_use]
pub fn requests_itemize<S: AsRef<str>>(tokens: &[S]) -> bool {
    scan_options(tokens).iter().any(is_itemize)
}

/// Returns the index of the first token that puts rsync into dry-run mode.
///
/// ```
/// use invocation::dry_run_position;
///
/// assert_eq!(dry_run_position(&["rsync", "-a", "-vn", "a/", "b/"]), Some(2));
/// assert_eq!(dry_run_position(&["rsync", "-e", "-n", "a/", "b/"]), None);
/// ```
#[must_use]
pub fn dry_run_position<S: AsRef<str>>(tokens: &[S]) -> Option<usize> {
    scan_options(tokens)
        .iter()
        .find(|option| is_dry_run(option))
        .map(|option| option.index)
}

/// Derives a command line that cannot modify the destination and reports every change.
///
/// `tokens` must already be normalised so that token 0 is the program. The
/// result always switches to dry-run mode within its first two tokens after
/// the program. Missing flags are inserted right after it, [`DRY_RUN_FLAG`]
/// first, ahead of the user's own options and operands. A dry-run flag the
/// user placed further back is repeated at the front; an itemize flag is never
/// duplicated, as rsync reads `-ii` as a request for unchanged items too. The
/// transformation is idempotent.
///
/// ```
/// use invocation::ensure_dry_run;
///
/// let once = ensure_dry_run(&["rsync", "-r", "a/", "b/"]);
/// assert_eq!(once, ["rsync", "-n", "-i", "-r", "a/", "b/"]);
/// assert_eq!(ensure_dry_run(&once), once);
/// ```
#[must_use]
pub fn ensure_dry_run<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let options = scan_options(tokens);
    let itemize = options.iter().any(is_itemize);
    // Inserting -i shifts an existing flag from index 2 to 3.
    let front_limit = if itemize { 2 } else { 1 };
    let dry_run_in_front = options
        .iter()
        .any(|option| is_dry_run(option) && option.index <= front_limit);

    let mut injected = Vec::with_capacity(2);
    if !dry_run_in_front {
        injected.push(DRY_RUN_FLAG);
    }
    if !itemize {
        injected.push(ITEMIZE_FLAG);
    }

    tracing::debug!(
        target: "rsync_preview::invocation",
        injected = ?injected,
        "enforcing dry-run itemized mode"
    );

    let mut command = Vec::with_capacity(tokens.len() + injected.len());
    let mut remaining = tokens.iter().map(|token| token.as_ref().to_owned());
    command.extend(remaining.next());
    command.extend(injected.into_iter().map(str::to_owned));
    command.extend(remaining);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_run_near_front(command: &[String]) -> bool {
        command[1..command.len().min(3)]
            .iter()
            .any(|token| token == DRY_RUN_FLAG)
    }

    #[test]
    fn bare_program_gains_both_flags() {
        let command = ensure_dry_run(&["rsync"]);
        assert_eq!(command, ["rsync", "-n", "-i"]);
        assert!(dry_run_near_front(&command));
    }

    #[test]
    fn flags_precede_user_arguments() {
        let command = ensure_dry_run(&["rsync", "-r", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-n", "-i", "-r", "a/", "b/"]);
        assert!(dry_run_near_front(&command));
    }

    #[test]
    fn existing_dry_run_is_not_duplicated() {
        let command = ensure_dry_run(&["rsync", "-n", "-r", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-i", "-n", "-r", "a/", "b/"]);
        assert!(dry_run_near_front(&command));
        assert_eq!(command.iter().filter(|t| *t == "-n").count(), 1);
    }

    #[test]
    fn existing_itemize_is_not_duplicated() {
        let command = ensure_dry_run(&["rsync", "--itemize-changes", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-n", "--itemize-changes", "a/", "b/"]);
    }

    #[test]
    fn grouped_flags_are_recognised() {
        let command = ensure_dry_run(&["rsync", "-avni", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-avni", "a/", "b/"]);
        assert!(requests_dry_run(&command));
        assert!(requests_itemize(&command));
    }

    #[test]
    fn long_dry_run_is_recognised() {
        let command = ensure_dry_run(&["rsync", "--dry-run", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-i", "--dry-run", "a/", "b/"]);
    }

    #[test]
    fn operands_after_marker_are_not_flags() {
        let command = ensure_dry_run(&["rsync", "--", "-n", "-i"]);
        assert_eq!(command, ["rsync", "-n", "-i", "--", "-n", "-i"]);
    }

    #[test]
    fn program_path_is_not_scanned_for_flags() {
        let command = ensure_dry_run(&["/opt/-ni/rsync", "a/", "b/"]);
        assert_eq!(command, ["/opt/-ni/rsync", "-n", "-i", "a/", "b/"]);
    }

    #[test]
    fn enforcement_is_idempotent() {
        let inputs: [&[&str]; 4] = [
            &["rsync"],
            &["rsync", "-r", "a/", "b/"],
            &["rsync", "-r", "-n", "a/", "b/"],
            &["rsync", "-vi", "--delete", "a/", "b/"],
        ];
        for input in inputs {
            let once = ensure_dry_run(input);
            let twice = ensure_dry_run(&once);
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn letters_inside_attached_values_are_not_flags() {
        let command = ensure_dry_run(&[
            "rsync",
            "-essh -o StrictHostKeyChecking=no",
            "-a",
            "--delete",
            "src/",
            "host:dst/",
        ]);
        assert_eq!(command[1..3], ["-n", "-i"]);
        assert_eq!(command.len(), 8);

        let command = ensure_dry_run(&["rsync", "-a", "-f- node_modules", "--delete", "src/", "dst/"]);
        assert_eq!(
            command,
            ["rsync", "-n", "-i", "-a", "-f- node_modules", "--delete", "src/", "dst/"]
        );
    }

    #[test]
    fn itemize_hidden_in_remote_shell_is_still_injected() {
        let command = ensure_dry_run(&["rsync", "-n", "-essh -i key", "s/", "host:d/"]);
        assert_eq!(command, ["rsync", "-i", "-n", "-essh -i key", "s/", "host:d/"]);
    }

    #[test]
    fn separate_option_values_are_not_flags() {
        let command = ensure_dry_run(&["rsync", "--exclude", "-n", "-e", "-i", "s/", "d/"]);
        assert_eq!(command[..3], ["rsync", "-n", "-i"]);
        assert!(!requests_dry_run(&["rsync", "--exclude", "-n"]));
        assert!(!requests_itemize(&["rsync", "-ave", "-i"]));
        assert!(requests_dry_run(&["rsync", "--exclude=*.tmp", "-n"]));
    }

    #[test]
    fn late_dry_run_is_repeated_at_the_front() {
        let command = ensure_dry_run(&["rsync", "-a", "--delete", "-v", "-n", "src/", "dst/"]);
        assert_eq!(
            command,
            ["rsync", "-n", "-i", "-a", "--delete", "-v", "-n", "src/", "dst/"]
        );
        assert!(dry_run_near_front(&command));
        assert_eq!(ensure_dry_run(&command), command);
    }

    #[test]
    fn second_position_dry_run_is_kept_when_nothing_shifts_it() {
        let command = ensure_dry_run(&["rsync", "-i", "-n", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-i", "-n", "a/", "b/"]);

        let command = ensure_dry_run(&["rsync", "-a", "-n", "a/", "b/"]);
        assert_eq!(command, ["rsync", "-n", "-i", "-a", "-n", "a/", "b/"]);
    }

    #[test]
    fn dry_run_position_follows_option_values() {
        assert_eq!(dry_run_position(&["rsync", "-avn"]), Some(1));
        assert_eq!(dry_run_position(&["rsync", "--rsh", "-n", "--dry-run"]), Some(3));
        assert_eq!(dry_run_position(&["rsync", "--", "-n"]), None);
    }

    #[test]
    fn user_tokens_keep_their_order() {
        let input = ["rsync", "-a", "--delete", "--exclude", "*.tmp", "src/", "dst/"];
        let command = ensure_dry_run(&input);
        let user: Vec<&str> = command
            .iter()
            .map(String::as_str)
            .filter(|token| *token != DRY_RUN_FLAG && *token != ITEMIZE_FLAG)
            .collect();
        assert_eq!(user, input);
    }
}
