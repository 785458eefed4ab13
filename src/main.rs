//! The CLI interface for chreso
//!
//! Without arguments the modes of the main display are listed, with an index the main
//! display is switched to that mode. Use the `--help` flag to see the available options.
use std::io;
use std::process::ExitCode;

use chreso::{Command, Output, Status};
use color_eyre::eyre::Result;
use structopt::{StructOpt, clap::AppSettings};

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "chreso",
    about = "Lists and switches the display mode of the main display.",
    setting = AppSettings::AllowLeadingHyphen
)]
struct Opts {
    /// Index of the display mode to switch to; omit to list all modes
    ///
    /// Values starting with `-` are passed through so the index parser can report them.
    #[structopt(name = "INDEX")]
    args: Vec<String>,
    /// Output debug info
    #[structopt(short, long, global = true)]
    verbose: bool,
}

/// Entry point for `chreso`.
fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    let command = Command::from_args(&opts.args);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut output = Output::new(stdout.lock(), stderr.lock());

    let status = run(command, &mut output)?;
    Ok(ExitCode::from(status.code()))
}

#[cfg(target_os = "macos")]
fn run<W: io::Write, E: io::Write>(
    command: Option<Command>,
    output: &mut Output<W, E>,
) -> Result<Status> {
    let service = chreso::platforms::macos::CoreGraphics::new();
    Ok(chreso::run(&service, command, output)?)
}

#[cfg(not(target_os = "macos"))]
fn run<W: io::Write, E: io::Write>(
    _command: Option<Command>,
    _output: &mut Output<W, E>,
) -> Result<Status> {
    Err(color_eyre::eyre::eyre!(
        "chreso needs the CoreGraphics display configuration API and only runs on macOS"
    ))
}
