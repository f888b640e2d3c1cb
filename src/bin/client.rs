use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

/// Runs the preview front-end and maps its status onto a process exit code.
#[must_use]
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let status = cli::run(args, stdout, stderr);
    cli::exit_code_from(status)
}
