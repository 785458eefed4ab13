//! A recording stand-in for the OS display configuration service.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use chreso::{
    CgError, ConfigureOption, DisplayId, DisplayMode, DisplayService, Fade, FadeToken, Output,
    PixelDepth,
};

pub const MAIN_DISPLAY: DisplayId = 69_733_382;

/// One call made into the service, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AllModes(DisplayId),
    CurrentMode(DisplayId),
    AcquireFadeReservation(f32),
    Fade(FadeToken, Fade),
    BeginConfiguration,
    ConfigureMode { config: u32, display: DisplayId, mode: usize },
    CompleteConfiguration(u32, ConfigureOption),
    CancelConfiguration(u32),
    ReleaseFadeReservation(FadeToken),
}

/// The service call a test wants to fail
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Failure {
    Acquire,
    FadeOut,
    Begin,
    Configure,
    Complete,
    FadeIn,
    Release,
}

pub struct FakeDisplay {
    modes: Vec<DisplayMode>,
    current: Option<usize>,
    list_available: bool,
    fail: Option<(Failure, i32)>,
    next_config: Cell<u32>,
    calls: RefCell<Vec<Call>>,
}

impl FakeDisplay {
    pub fn new(modes: Vec<DisplayMode>, current: Option<usize>) -> Self {
        Self {
            modes,
            current,
            list_available: true,
            fail: None,
            next_config: Cell::new(1),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A laptop panel with scaled and native modes, the second one active
    pub fn laptop() -> Self {
        Self::new(
            vec![
                DisplayMode::new(1440, 900, 2880, PixelDepth::Bits32),
                DisplayMode::new(1680, 1050, 3360, PixelDepth::Bits32),
                DisplayMode::new(1280, 800, 2560, PixelDepth::Bits32),
                DisplayMode::new(2880, 1800, 2880, PixelDepth::Bits32),
                DisplayMode::new(1024, 768, 1024, PixelDepth::Bits16),
            ],
            Some(1),
        )
    }

    pub fn without_mode_list(mut self) -> Self {
        self.list_available = false;
        self
    }

    pub fn failing(mut self, failure: Failure, code: i32) -> Self {
        self.fail = Some((failure, code));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that touch the fade reservation or the configuration transaction
    pub fn transaction_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::AllModes(_) | Call::CurrentMode(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn outcome(&self, failure: Failure) -> Result<(), CgError> {
        match self.fail {
            Some((f, code)) if f == failure => Err(CgError(code)),
            _ => Ok(()),
        }
    }
}

pub const TOKEN: FadeToken = FadeToken(7);

impl DisplayService for FakeDisplay {
    type Mode = usize;
    type Config = u32;

    fn main_display(&self) -> DisplayId {
        MAIN_DISPLAY
    }

    fn all_modes(&self, display: DisplayId) -> Option<Vec<Self::Mode>> {
        self.record(Call::AllModes(display));
        self.list_available.then(|| (0..self.modes.len()).collect())
    }

    fn current_mode(&self, display: DisplayId) -> Option<Self::Mode> {
        self.record(Call::CurrentMode(display));
        self.current
    }

    fn describe(&self, mode: &Self::Mode) -> DisplayMode {
        self.modes[*mode]
    }

    fn acquire_fade_reservation(&self, interval: f32) -> Result<FadeToken, CgError> {
        self.record(Call::AcquireFadeReservation(interval));
        self.outcome(Failure::Acquire)?;
        Ok(TOKEN)
    }

    fn fade(&self, token: FadeToken, fade: &Fade) -> Result<(), CgError> {
        self.record(Call::Fade(token, *fade));
        if *fade == Fade::OUT {
            self.outcome(Failure::FadeOut)
        } else {
            self.outcome(Failure::FadeIn)
        }
    }

    fn release_fade_reservation(&self, token: FadeToken) -> Result<(), CgError> {
        self.record(Call::ReleaseFadeReservation(token));
        self.outcome(Failure::Release)
    }

    fn begin_configuration(&self) -> Result<Self::Config, CgError> {
        self.record(Call::BeginConfiguration);
        self.outcome(Failure::Begin)?;
        let config = self.next_config.get();
        self.next_config.set(config + 1);
        Ok(config)
    }

    fn configure_mode(
        &self,
        config: &Self::Config,
        display: DisplayId,
        mode: &Self::Mode,
    ) -> Result<(), CgError> {
        self.record(Call::ConfigureMode {
            config: *config,
            display,
            mode: *mode,
        });
        self.outcome(Failure::Configure)
    }

    fn complete_configuration(
        &self,
        config: &Self::Config,
        option: ConfigureOption,
    ) -> Result<(), CgError> {
        self.record(Call::CompleteConfiguration(*config, option));
        self.outcome(Failure::Complete)
    }

    fn cancel_configuration(&self, config: &Self::Config) {
        self.record(Call::CancelConfiguration(*config));
    }
}

pub type Buffers = Output<Vec<u8>, Vec<u8>>;

pub fn buffers() -> Buffers {
    Output::new(Vec::new(), Vec::new())
}

pub fn stdout(output: &Buffers) -> String {
    String::from_utf8(output.out.clone()).expect("stdout is utf-8")
}

pub fn stderr(output: &Buffers) -> String {
    String::from_utf8(output.err.clone()).expect("stderr is utf-8")
}
