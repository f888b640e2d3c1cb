//! Recognition of the rsync program token.

/// Canonical name of the external synchronisation tool.
#[doc(alias = "rsync")]
pub const PROGRAM_NAME: &str = "rsync";

#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];

#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Returns the final path segment of `token`.
///
/// A token that ends in a separator yields an empty basename, so it can never
/// match a program name.
///
/// ```
/// use invocation::basename;
///
/// assert_eq!(basename("/usr/bin/rsync"), "rsync");
/// assert_eq!(basename("/usr/bin/rsync/"), "");
/// assert_eq!(basename("rsync"), "rsync");
/// ```
#[must_use]
pub fn basename(token: &str) -> &str {
    match token.rfind(SEPARATORS) {
        Some(index) => &token[index + 1..],
        None => token,
    }
}

/// Reports whether `token` invokes rsync, by bare name or through a path.
#[must_use]
pub fn is_program_token(token: &str) -> bool {
    basename(token) == PROGRAM_NAME
}

/// Returns the index of the leftmost token that invokes rsync.
///
/// A token further right that merely contains `rsync` as a path segment (for
/// example a synced file called `rsync`) is only reported when no earlier
/// token qualifies.
#[must_use]
pub fn locate<S: AsRef<str>>(tokens: &[S]) -> Option<usize> {
    tokens
        .iter()
        .position(|token| is_program_token(token.as_ref()))
}

/// Returns a command line whose first token is an rsync invocation.
///
/// Only position 0 is consulted: a list that mentions `rsync` somewhere else
/// still gets the canonical name prepended.
#[must_use]
pub fn normalize<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut command = Vec::with_capacity(tokens.len() + 1);
    let starts_with_program = tokens
        .first()
        .is_some_and(|first| is_program_token(first.as_ref()));

    if !starts_with_program {
        command.push(PROGRAM_NAME.to_owned());
    }
    command.extend(tokens.iter().map(|token| token.as_ref().to_owned()));
    command
}
