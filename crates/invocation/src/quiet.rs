use crate::flags::short_group;
use crate::options::scan_options;

const QUIET_LONG: &str = "--quiet";
const QUIET_SHORT: char = 'q';

/// Reports whether `tokens` carry an option that silences rsync's per-item output.
///
/// A token counts when it is exactly `--quiet`, or when it is a single-dash
/// short-option group containing `q` (`-q`, `-vqr`). Bare words such as a
/// directory named `q` never count. The check is a pre-flight guard, not a
/// parser of rsync's full option grammar.
#[must_use]
pub fn has_quiet_flag<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens.iter().map(AsRef::as_ref).any(|token| {
        token == QUIET_LONG || short_group(token).is_some_and(|group| group.contains(QUIET_SHORT))
    })
}

/// Returns the options that would replace or cancel the itemized report.
///
/// rsync prints `--out-format`/`--log-format` instead of the itemize prefix
/// unless the format contains `%i`, and a `--no-i`/`--no-itemize-changes`
/// that comes after the last itemize request switches the report off. Either
/// way a dry run would list no changes. Each offending token is returned
/// once, in command-line order.
///
/// ```
/// use invocation::itemize_overrides;
///
/// let tokens = ["rsync", "-n", "-i", "--out-format=%n", "a/", "b/"];
/// assert_eq!(itemize_overrides(&tokens), ["--out-format=%n"]);
/// ```
#[must_use]
pub fn itemize_overrides<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    let options = scan_options(tokens);
    let mut overrides: Vec<usize> = options
        .iter()
        .filter(|option| {
            (option.is_long("out-format") || option.is_long("log-format"))
                && !option.value.is_some_and(|format| format.contains("%i"))
        })
        .map(|option| option.index)
        .collect();

    let last_request = options
        .iter()
        .rposition(|option| option.is('i', "itemize-changes"));
    let cancelled = options
        .iter()
        .enumerate()
        .filter(|(position, option)| {
            last_request.is_none_or(|last| *position > last)
                && (option.is_long("no-i") || option.is_long("no-itemize-changes"))
        })
        .map(|(_, option)| option.index);
    overrides.extend(cancelled);

    overrides.sort_unstable();
    overrides.dedup();
    overrides
        .into_iter()
        .map(|index| tokens[index].as_ref())
        .collect()
}
