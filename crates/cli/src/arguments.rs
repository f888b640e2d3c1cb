use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::PathBufValueParser};

use crate::PROGRAM_NAME;
use crate::error::CliError;

/// Deterministic help text describing the front-end's own options.
pub(crate) const HELP_TEXT: &str = concat!(
    "rsync-preview ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: rsync-preview [OPTIONS] rsync [RSYNC-OPTIONS] SRC... DEST\n",
    "       rsync-preview [OPTIONS] --input FILE\n",
    "\n",
    "Runs the given rsync command as a dry run with itemized output and prints\n",
    "what it would change, one entry per line: A (added), M (modified) or\n",
    "D (deleted), followed by the path. Everything from the first token named\n",
    "rsync onwards is passed to rsync unchanged, apart from the -n and -i flags\n",
    "that are added when missing.\n",
    "\n",
    "Options:\n",
    "  -b, --batch              Print the change log and exit.\n",
    "  -i, --input FILE         Read the rsync command line from FILE.\n",
    "      --progress           Report the number of items received on stderr.\n",
    "      --skip-detect-quiet  Run even if the rsync command line asks for quiet output.\n",
    "  -v, --verbose            Increase diagnostic output (repeatable).\n",
    "  -V, --version            Output version information and exit.\n",
    "  -h, --help               Show this help message and exit.\n",
    "\n",
    "Environment:\n",
    "  RSYNC_PREVIEW_RSYNC      rsync executable to run for a bare 'rsync' token.\n",
    "  RSYNC_PREVIEW_LOG        Log filter directives overriding -v.\n",
);

/// Parsed front-end options.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) batch: bool,
    pub(crate) input: Option<PathBuf>,
    pub(crate) progress: bool,
    pub(crate) skip_detect_quiet: bool,
    pub(crate) verbose: u8,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .short('b')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("FILE")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-detect-quiet")
                .long("skip-detect-quiet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
}

/// Parses the front-end's own tokens (program name excluded).
pub(crate) fn parse_args(own: &[String]) -> Result<ParsedArgs, CliError> {
    let arguments = std::iter::once(PROGRAM_NAME).chain(own.iter().map(String::as_str));
    let mut matches = clap_command()
        .try_get_matches_from(arguments)
        .map_err(|error| CliError::Usage(usage_message(&error)))?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        batch: matches.get_flag("batch"),
        input: matches.remove_one::<PathBuf>("input"),
        progress: matches.get_flag("progress"),
        skip_detect_quiet: matches.get_flag("skip-detect-quiet"),
        verbose: matches.get_count("verbose"),
    })
}

fn usage_message(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    let trimmed = rendered.trim();
    trimmed
        .strip_prefix("error: ")
        .unwrap_or(trimmed)
        .to_owned()
}
