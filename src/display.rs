use core::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::{
    service::{CgError, ConfigureOption, DisplayService, Fade, MAX_RESERVATION_INTERVAL},
    transaction::{ConfigTransaction, FadeReservation},
    types::{DisplayId, DisplayMode, ModeIndex, ModeLine, ParseIndexError},
};

/// Usage text printed after the listing and on a wrong argument count
pub const USAGE: &str = "\
[Usage] chreso    -  showing main display modes.
        chreso N  -  N is index of display mode to setup.
";

/// A step of the mode switch transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    AcquireFadeReservation,
    FadeOut,
    BeginConfiguration,
    ConfigureMode,
    CompleteConfiguration,
    FadeIn,
    ReleaseFadeReservation,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::AcquireFadeReservation => "acquire display fade reservation",
            Step::FadeOut => "display fade out",
            Step::BeginConfiguration => "begin display configuration",
            Step::ConfigureMode => "configure display mode",
            Step::CompleteConfiguration => "complete display configuration",
            Step::FadeIn => "display fade in",
            Step::ReleaseFadeReservation => "release display fade reservation",
        };
        f.write_str(name)
    }
}

/// Error type for the display module
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error(transparent)]
    Argument(#[from] ParseIndexError),
    #[error("failed to make the display mode list")]
    ModeList,
    #[error("index {index} is greater than display mode list length ({count})")]
    OutOfBounds { index: usize, count: usize },
    #[error("{step} failed; returned code: {code}")]
    Step { step: Step, code: CgError },
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

impl DisplayError {
    fn at(step: Step) -> impl FnOnce(CgError) -> DisplayError {
        move |code| {
            log::debug!("{} failed with code {}", step, code);
            DisplayError::Step { step, code }
        }
    }
}

type Result<T = ()> = std::result::Result<T, DisplayError>;

/// The pair of streams every operation writes to
pub struct Output<W, E> {
    /// Listing and confirmation text
    pub out: W,
    /// Diagnostics and usage on misuse
    pub err: E,
}

impl<W: Write, E: Write> Output<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }
}

/// A mode handle together with its attributes
#[derive(Debug, Clone)]
pub struct ModeEntry<M> {
    pub handle: M,
    pub info: DisplayMode,
}

/// All modes of one display, in OS order
#[derive(Debug, Clone)]
pub struct ModeList<M> {
    entries: Vec<ModeEntry<M>>,
    current: Option<usize>,
}

impl<M: Clone + PartialEq> ModeList<M> {
    /// Enumerates the modes of `display` and locates the active one
    pub fn query<S>(service: &S, display: DisplayId) -> Result<Self>
    where
        S: DisplayService<Mode = M>,
    {
        let handles = service.all_modes(display).ok_or_else(|| {
            log::debug!("No display mode list for display {}", display);
            DisplayError::ModeList
        })?;
        let current_mode = service.current_mode(display);

        let current = current_mode
            .as_ref()
            .and_then(|current| handles.iter().position(|mode| mode == current));

        let entries: Vec<_> = handles
            .into_iter()
            .map(|handle| ModeEntry {
                info: service.describe(&handle),
                handle,
            })
            .collect();

        log::debug!(
            "Display {}: {} modes, current {:?}",
            display,
            entries.len(),
            current
        );

        Ok(Self { entries, current })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the mode for the given `index`
    pub fn get(&self, index: ModeIndex) -> Option<&ModeEntry<M>> {
        self.entries.get(index.get())
    }

    /// Index of the active mode, if it appears in the list
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ModeEntry<M>> {
        self.entries.iter()
    }
}

impl<M> fmt::Display for ModeList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ Display Modes ] - count:{}", self.entries.len())?;
        writeln!(f)?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{}", ModeLine::new(i, &entry.info, self.current == Some(i)))?;
        }
        Ok(())
    }
}

/// Prints all modes of `display`, followed by the usage text
pub fn show_modes<S, W, E>(service: &S, display: DisplayId, output: &mut Output<W, E>) -> Result
where
    S: DisplayService,
    W: Write,
    E: Write,
{
    let modes = ModeList::query(service, display)?;

    write!(output.out, "{}", modes)?;
    writeln!(output.out)?;
    write!(output.out, "{}", USAGE)?;
    Ok(())
}

/// Switches `display` to the mode at the index given in `arg`
///
/// The display is faded to black around the change. An open configuration transaction is
/// always canceled when it cannot be completed; nothing else is rolled back.
pub fn switch_mode<S, W, E>(
    service: &S,
    display: DisplayId,
    arg: &str,
    output: &mut Output<W, E>,
) -> Result
where
    S: DisplayService,
    W: Write,
    E: Write,
{
    let index: ModeIndex = arg.parse()?;

    let modes = ModeList::query(service, display)?;
    let mode = modes.get(index).ok_or(DisplayError::OutOfBounds {
        index: index.get(),
        count: modes.len(),
    })?;
    log::debug!("Switching display {} to mode {}: {:?}", display, index, mode.info);

    let reservation = FadeReservation::acquire(service, MAX_RESERVATION_INTERVAL)
        .map_err(DisplayError::at(Step::AcquireFadeReservation))?;
    reservation
        .fade(&Fade::OUT)
        .map_err(DisplayError::at(Step::FadeOut))?;

    apply_mode(service, display, &mode.handle)?;

    reservation
        .fade(&Fade::IN)
        .map_err(DisplayError::at(Step::FadeIn))?;
    reservation
        .release()
        .map_err(DisplayError::at(Step::ReleaseFadeReservation))?;

    writeln!(output.out, "Success change display resolution.")?;
    writeln!(output.out, "{}", ModeLine::new(index.get(), &mode.info, false))?;
    Ok(())
}

/// Runs one configuration transaction that sets `mode` permanently
fn apply_mode<S: DisplayService>(service: &S, display: DisplayId, mode: &S::Mode) -> Result {
    let transaction =
        ConfigTransaction::begin(service).map_err(DisplayError::at(Step::BeginConfiguration))?;
    transaction
        .configure(display, mode)
        .map_err(DisplayError::at(Step::ConfigureMode))?;
    transaction
        .complete(ConfigureOption::Permanently)
        .map_err(DisplayError::at(Step::CompleteConfiguration))
}
