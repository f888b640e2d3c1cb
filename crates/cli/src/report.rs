//! Rendering of the change log and its side channels.

use std::io::{self, Write};

/// Prefix of the first change-log line, which echoes the command being run.
pub(crate) const COMMAND_LINE_PREFIX: &str = "rsync command line: ";

/// Quotes a token for safe shell usage.
fn shell_quote(token: &str) -> String {
    if !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.' | ':' | '=' | ',' | '+' | '@')
        })
    {
        return token.to_owned();
    }

    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('\'');
    for ch in token.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Joins `command` into one line that a POSIX shell would split back into the
/// same tokens.
pub(crate) fn render_command_line<S: AsRef<str>>(command: &[S]) -> String {
    command
        .iter()
        .map(|token| shell_quote(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counter of received items, redrawn in place on a terminal line.
pub(crate) struct Progress<'a, W: Write> {
    sink: &'a mut W,
    enabled: bool,
    received: usize,
}

impl<'a, W: Write> Progress<'a, W> {
    pub(crate) fn new(sink: &'a mut W, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            received: 0,
        }
    }

    /// Counts one item and redraws the counter.
    pub(crate) fn record(&mut self) -> io::Result<()> {
        self.received += 1;
        if !self.enabled {
            return Ok(());
        }
        write!(self.sink, "\r{} items received", self.received)?;
        self.sink.flush()
    }

    /// Terminates the counter line and returns the total.
    pub(crate) fn finish(self) -> io::Result<usize> {
        if self.enabled && self.received > 0 {
            writeln!(self.sink)?;
        }
        Ok(self.received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invocation::parse_command_line;

    #[test]
    fn plain_tokens_are_not_quoted() {
        let line = render_command_line(&["rsync", "-n", "-i", "-a", "src/", "host:dst/"]);
        assert_eq!(line, "rsync -n -i -a src/ host:dst/");
    }

    #[test]
    fn special_tokens_are_single_quoted() {
        assert_eq!(shell_quote("my docs/"), "'my docs/'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
        assert_eq!(shell_quote("*.tmp"), "'*.tmp'");
    }

    #[test]
    fn rendered_line_parses_back_to_the_same_tokens() {
        let command = ["rsync", "-n", "--exclude", "it's *.bak", "", "a b/", "dst/"];
        let line = render_command_line(&command);
        assert_eq!(parse_command_line(&line).expect("parse"), command);
    }

    #[test]
    fn progress_redraws_in_place() {
        let mut sink = Vec::new();
        let mut progress = Progress::new(&mut sink, true);
        progress.record().expect("write");
        progress.record().expect("write");
        assert_eq!(progress.finish().expect("write"), 2);
        assert_eq!(
            String::from_utf8(sink).expect("utf-8"),
            "\r1 items received\r2 items received\n"
        );
    }

    #[test]
    fn disabled_progress_only_counts() {
        let mut sink = Vec::new();
        let mut progress = Progress::new(&mut sink, false);
        progress.record().expect("write");
        assert_eq!(progress.finish().expect("write"), 1);
        assert!(sink.is_empty());
    }
}
