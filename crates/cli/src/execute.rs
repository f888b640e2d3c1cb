use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

use invocation::{
    ensure_dry_run, has_quiet_flag, itemize_overrides, normalize, parse_command_line,
    split_arguments,
};
use itemize::try_change_events;
use logging::Verbosity;
use runner::{ReportStream, RunnerConfig};

use crate::arguments::{HELP_TEXT, parse_args};
use crate::error::CliError;
use crate::report::{COMMAND_LINE_PREFIX, Progress, render_command_line};
use crate::{PROGRAM_NAME, VERSION};

const TARGET: &str = "rsync_preview::cli";

/// Runs one preview and returns rsync's exit code.
pub(crate) fn execute<I, S, Out, Err>(
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
    config: &RunnerConfig,
) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let arguments = utf8_arguments(arguments.into_iter().skip(1))?;
    let split = split_arguments(arguments);
    let parsed = parse_args(&split.own)?;

    if parsed.show_help {
        stdout
            .write_all(HELP_TEXT.as_bytes())
            .map_err(CliError::Output)?;
        return Ok(0);
    }
    if parsed.show_version {
        writeln!(stdout, "{PROGRAM_NAME} {VERSION}").map_err(CliError::Output)?;
        return Ok(0);
    }

    logging::init_tracing(Verbosity::from_occurrences(parsed.verbose));

    let tokens = command_tokens(parsed.input.as_deref(), split.rsync)?;
    let command = prepare_command(&tokens, parsed.skip_detect_quiet)?;

    writeln!(stdout, "{COMMAND_LINE_PREFIX}{}", render_command_line(&command))
        .map_err(CliError::Output)?;
    if !parsed.batch {
        tracing::warn!(
            target: TARGET,
            "no interactive viewer is available in this build; printing the change log"
        );
    }

    let mut stream = ReportStream::spawn(&command, config)?;
    let mut progress = Progress::new(stderr, parsed.progress);
    for event in try_change_events(stream.by_ref()) {
        let event = event?;
        writeln!(stdout, "{event}").map_err(CliError::Output)?;
        progress.record().map_err(CliError::Output)?;
    }
    let received = progress.finish().map_err(CliError::Output)?;
    stdout.flush().map_err(CliError::Output)?;

    let code = stream.finish()?;
    if code == 0 {
        tracing::info!(target: TARGET, received, "preview complete");
    } else {
        tracing::warn!(target: TARGET, code, received, "rsync reported a failure");
    }
    Ok(code)
}

fn utf8_arguments<I, S>(arguments: I) -> Result<Vec<String>, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    arguments
        .into_iter()
        .map(|argument| {
            argument
                .into()
                .into_string()
                .map_err(|raw| CliError::NonUtf8Argument(raw.to_string_lossy().into_owned()))
        })
        .collect()
}

/// Picks the rsync command line: the `--input` file when given, else the
/// tokens that followed the program token on the command line.
fn command_tokens(input: Option<&Path>, inline: Vec<String>) -> Result<Vec<String>, CliError> {
    let Some(path) = input else {
        if inline.is_empty() {
            return Err(CliError::MissingCommandLine);
        }
        return Ok(inline);
    };

    let text = fs::read_to_string(path).map_err(|source| CliError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = parse_command_line(&text).map_err(|source| CliError::CommandFile {
        path: path.to_path_buf(),
        source,
    })?;
    if !inline.is_empty() {
        tracing::info!(
            target: TARGET,
            path = %path.display(),
            "input file overrides the rsync command line given as arguments"
        );
    }
    if tokens.is_empty() {
        return Err(CliError::MissingCommandLine);
    }
    Ok(tokens)
}

/// Normalises `tokens`, rejects quiet runs and forces a dry run with
/// itemized output. Options that would still hide the itemized report are
/// reported as warnings.
fn prepare_command(tokens: &[String], skip_detect_quiet: bool) -> Result<Vec<String>, CliError> {
    let normalized = normalize(tokens);
    if has_quiet_flag(&normalized) {
        if !skip_detect_quiet {
            return Err(CliError::QuietFlag);
        }
        tracing::warn!(
            target: TARGET,
            "quiet flag left in place; the change log may be empty"
        );
    }
    let command = ensure_dry_run(&normalized);
    for option in itemize_overrides(&command) {
        tracing::warn!(
            target: TARGET,
            option,
            "option replaces the itemized report; the change log may be empty"
        );
    }
    Ok(command)
}
