//! Dispatches the command line onto the display operations.

use std::io::{self, Write};

use crate::{
    display::{DisplayError, Output, USAGE, show_modes, switch_mode},
    service::DisplayService,
};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all modes of the main display
    List,
    /// Switch the main display to the mode at the given index
    Switch(String),
}

impl Command {
    /// Selects the command from the positional arguments, `None` on a wrong argument count
    pub fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [] => Some(Command::List),
            [index] => Some(Command::Switch(index.clone())),
            _ => None,
        }
    }
}

/// Outcome of a run, mapped to the process exit code
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
        }
    }
}

/// Runs `command` against the main display of `service`
///
/// Diagnostics are written to `output.err` as one line each. Only failures to write to the
/// output streams themselves are returned as errors.
pub fn run<S, W, E>(
    service: &S,
    command: Option<Command>,
    output: &mut Output<W, E>,
) -> io::Result<Status>
where
    S: DisplayService,
    W: Write,
    E: Write,
{
    let Some(command) = command else {
        write!(output.err, "{}", USAGE)?;
        return Ok(Status::Failure);
    };

    let display = service.main_display();
    log::debug!("Running {:?} on display {}", command, display);

    let result = match &command {
        Command::List => show_modes(service, display, output),
        Command::Switch(arg) => switch_mode(service, display, arg, output),
    };

    match result {
        Ok(()) => Ok(Status::Success),
        Err(DisplayError::Output(e)) => Err(e),
        Err(e) => {
            writeln!(output.err, "error: {}", e)?;
            Ok(Status::Failure)
        }
    }
}
