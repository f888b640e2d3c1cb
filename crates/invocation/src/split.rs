use crate::flags::short_group;
use crate::program::is_program_token;

const INPUT_LONG: &str = "--input";
const INPUT_SHORT: char = 'i';

/// A combined argument vector separated into the front-end's flags and the rsync invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitArguments {
    /// Tokens addressed to the preview front-end itself.
    pub own: Vec<String>,
    /// The embedded rsync invocation, starting with the program token, or empty.
    pub rsync: Vec<String>,
}

/// Reports whether `token` is a front-end option whose value is the next token.
fn takes_value(token: &str) -> bool {
    token == INPUT_LONG || short_group(token).is_some_and(|group| group.ends_with(INPUT_SHORT))
}

/// Splits `arguments` (program name excluded) at the leftmost rsync program token.
///
/// A program-looking token that is the value of `--input`/`-i` belongs to the
/// front-end (`-i rsync` names a file called `rsync`), so the search resumes
/// after it. When no program token is found every argument is an own flag.
///
/// ```
/// use invocation::split_arguments;
///
/// let split = split_arguments(["-b", "-i", "rsync", "rsync", "-a", "s/", "d/"]);
/// assert_eq!(split.own, ["-b", "-i", "rsync"]);
/// assert_eq!(split.rsync, ["rsync", "-a", "s/", "d/"]);
/// ```
#[must_use]
pub fn split_arguments<I, S>(arguments: I) -> SplitArguments
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = arguments.into_iter().map(Into::into).collect();

    let mut boundary = None;
    let mut previous_takes_value = false;
    for (index, token) in tokens.iter().enumerate() {
        if is_program_token(token) && !previous_takes_value {
            boundary = Some(index);
            break;
        }
        previous_takes_value = !previous_takes_value && takes_value(token);
    }

    match boundary {
        Some(index) => {
            let mut own = tokens;
            let rsync = own.split_off(index);
            SplitArguments { own, rsync }
        }
        None => SplitArguments {
            own: tokens,
            rsync: Vec::new(),
        },
    }
}
