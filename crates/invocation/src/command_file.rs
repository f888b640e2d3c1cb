//! Parsing of rsync command lines saved in a file.
//!
//! The accepted syntax is the subset of POSIX shell word splitting that people
//! actually use when pasting a command line into a file: whitespace separates
//! words, single quotes are literal, double quotes honour `\"`, `\\`, `\$` and
//! `` \` ``, a backslash outside quotes escapes the next character, and a `#`
//! that starts a word comments out the rest of the line.

use thiserror::Error;

/// Errors produced when a saved command line cannot be split into words.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CommandLineError {
    /// A single-quoted word was still open at end of input.
    #[error("unterminated single quote in command line")]
    UnterminatedSingleQuote,
    /// A double-quoted word was still open at end of input.
    #[error("unterminated double quote in command line")]
    UnterminatedDoubleQuote,
    /// The input ended with a backslash that escapes nothing.
    #[error("command line ends with a dangling backslash")]
    DanglingEscape,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Between,
    Word,
    Single,
    Double,
    Comment,
}

/// Splits `text` into command-line words.
///
/// ```
/// use invocation::parse_command_line;
///
/// let words = parse_command_line("# preview\nrsync -a 'my docs/' \"backup dir/\"\n")?;
/// assert_eq!(words, ["rsync", "-a", "my docs/", "backup dir/"]);
/// # Ok::<(), invocation::CommandLineError>(())
/// ```
pub fn parse_command_line(text: &str) -> Result<Vec<String>, CommandLineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match state {
            State::Comment => {
                if ch == '\n' {
                    state = State::Between;
                }
            }
            State::Single => {
                if ch == '\'' {
                    state = State::Word;
                } else {
                    current.push(ch);
                }
            }
            State::Double => match ch {
                '"' => state = State::Word,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\' | '$' | '`')) => current.push(next),
                    Some('\n') => {}
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(CommandLineError::UnterminatedDoubleQuote),
                },
                _ => current.push(ch),
            },
            State::Between | State::Word => match ch {
                '#' if state == State::Between => state = State::Comment,
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => match chars.next() {
                    Some('\n') => {}
                    Some(next) => {
                        current.push(next);
                        state = State::Word;
                    }
                    None => return Err(CommandLineError::DanglingEscape),
                },
                ch if ch.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                _ => {
                    current.push(ch);
                    state = State::Word;
                }
            },
        }
    }

    match state {
        State::Single => Err(CommandLineError::UnterminatedSingleQuote),
        State::Double => Err(CommandLineError::UnterminatedDoubleQuote),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Between | State::Comment => Ok(words),
    }
}
