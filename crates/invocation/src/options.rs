//! Value-aware scanning of rsync's options.
//!
//! rsync accepts short clusters such as `-avz`, but a value-taking letter ends
//! the cluster: in `-essh -o Port=2222` everything after `e` is the remote
//! shell, and a bare `-e` consumes the next token. Long options take their
//! value either inline (`--exclude=*.tmp`) or from the next token
//! (`--exclude -n`). Detectors that only look for letters would read flags
//! inside those values, so they work on the occurrences produced here.

use crate::flags::END_OF_OPTIONS;

/// Short options that require a value.
const VALUE_SHORTS: &[char] = &['e', 'f', 'B', 'T', 'M', '@'];

/// Long options (without the leading `--`) that require a value.
const VALUE_LONGS: &[&str] = &[
    "address",
    "backup-dir",
    "block-size",
    "bwlimit",
    "cc",
    "checksum-choice",
    "checksum-seed",
    "chmod",
    "chown",
    "compare-dest",
    "compress-choice",
    "compress-level",
    "config",
    "connect-program",
    "contimeout",
    "copy-as",
    "copy-dest",
    "debug",
    "dparam",
    "early-input",
    "exclude",
    "exclude-from",
    "files-from",
    "filter",
    "groupmap",
    "iconv",
    "include",
    "include-from",
    "info",
    "link-dest",
    "log-file",
    "log-file-format",
    "log-format",
    "max-alloc",
    "max-delete",
    "max-size",
    "min-size",
    "modify-window",
    "only-write-batch",
    "out-format",
    "outbuf",
    "partial-dir",
    "password-file",
    "port",
    "protocol",
    "read-batch",
    "remote-option",
    "rsh",
    "rsync-path",
    "skip-compress",
    "sockopts",
    "stderr",
    "stop-after",
    "stop-at",
    "suffix",
    "temp-dir",
    "time-limit",
    "timeout",
    "usermap",
    "write-batch",
    "zc",
];

/// Name of one recognised option.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptionName<'a> {
    /// A letter from a single-dash cluster.
    Short(char),
    /// A double-dash option, without the dashes and without any `=value`.
    Long(&'a str),
}

/// One option occurrence in a command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OptionUse<'a> {
    /// Index of the token the option was read from.
    pub(crate) index: usize,
    pub(crate) name: OptionName<'a>,
    /// The option's value, inline or taken from the following token.
    pub(crate) value: Option<&'a str>,
}

impl OptionUse<'_> {
    pub(crate) fn is(&self, short: char, long: &str) -> bool {
        match self.name {
            OptionName::Short(letter) => letter == short,
            OptionName::Long(name) => name == long,
        }
    }

    pub(crate) fn is_long(&self, long: &str) -> bool {
        self.name == OptionName::Long(long)
    }
}

/// Lists the options of a normalised command line in order of appearance.
///
/// Token 0 is the program and is skipped; scanning stops at `--`. Operands
/// may sit between options, as rsync permutes its arguments. Values are
/// attached to the option that consumes them and are never scanned for
/// further letters.
pub(crate) fn scan_options<S: AsRef<str>>(tokens: &[S]) -> Vec<OptionUse<'_>> {
    let mut options = Vec::new();
    let mut index = 1;
    while let Some(token) = token_at(tokens, index) {
        if token == END_OF_OPTIONS {
            break;
        }
        let separate_value = token_at(tokens, index + 1);

        let mut consumed_next = false;
        if let Some(long) = token.strip_prefix("--") {
            match long.split_once('=') {
                Some((name, value)) => options.push(OptionUse {
                    index,
                    name: OptionName::Long(name),
                    value: Some(value),
                }),
                None => {
                    let takes_value = VALUE_LONGS.contains(&long);
                    consumed_next = takes_value && separate_value.is_some();
                    options.push(OptionUse {
                        index,
                        name: OptionName::Long(long),
                        value: separate_value.filter(|_| takes_value),
                    });
                }
            }
        } else if let Some(cluster) = token.strip_prefix('-').filter(|rest| !rest.is_empty()) {
            for (at, letter) in cluster.char_indices() {
                if !VALUE_SHORTS.contains(&letter) {
                    options.push(OptionUse {
                        index,
                        name: OptionName::Short(letter),
                        value: None,
                    });
                    continue;
                }

                let attached = &cluster[at + letter.len_utf8()..];
                let value = if attached.is_empty() {
                    consumed_next = separate_value.is_some();
                    separate_value
                } else {
                    Some(attached)
                };
                options.push(OptionUse {
                    index,
                    name: OptionName::Short(letter),
                    value,
                });
                break;
            }
        }

        index += if consumed_next { 2 } else { 1 };
    }
    options
}

fn token_at<S: AsRef<str>>(tokens: &[S], index: usize) -> Option<&str> {
    tokens.get(index).map(AsRef::as_ref)
}
