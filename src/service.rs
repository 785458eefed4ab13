//! The seam between `chreso` and the OS display configuration service.

use core::fmt;

use crate::types::{DisplayId, DisplayMode};

/// Status code returned by a failing display configuration call (`CGError`)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CgError(pub i32);

impl fmt::Display for CgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a raw status code into a `Result`; `0` is success
pub fn check(code: i32) -> Result<(), CgError> {
    if code == 0 { Ok(()) } else { Err(CgError(code)) }
}

/// Token granted by a fade reservation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FadeToken(pub u32);

/// Longest fade reservation the OS grants, in seconds (`kCGMaxDisplayReservationInterval`)
pub const MAX_RESERVATION_INTERVAL: f32 = 15.0;

/// Blend fraction of an unfaded display (`kCGDisplayBlendNormal`)
pub const BLEND_NORMAL: f32 = 0.0;
/// Blend fraction of a display fully covered by the fade color (`kCGDisplayBlendSolidColor`)
pub const BLEND_SOLID_COLOR: f32 = 1.0;

/// Describes one fade transition
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fade {
    /// Duration in seconds
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    /// Red, green and blue components of the fade color
    pub color: (f32, f32, f32),
    /// Block until the fade has finished
    pub synchronous: bool,
}

impl Fade {
    /// Fades the display to solid black
    pub const OUT: Fade = Fade {
        duration: 0.3,
        from: BLEND_NORMAL,
        to: BLEND_SOLID_COLOR,
        color: (0.0, 0.0, 0.0),
        synchronous: true,
    };

    /// Fades the display back from solid black
    pub const IN: Fade = Fade {
        duration: 0.3,
        from: BLEND_SOLID_COLOR,
        to: BLEND_NORMAL,
        color: (0.0, 0.0, 0.0),
        synchronous: false,
    };
}

/// How long a completed configuration stays in effect (`CGConfigureOption`)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ConfigureOption {
    ForAppOnly = 0,
    ForSession = 1,
    Permanently = 2,
}

/// The display configuration calls `chreso` needs from the OS
///
/// The macOS implementation lives in `platforms::macos`; tests provide a recording fake.
pub trait DisplayService {
    /// Opaque handle to one display mode
    type Mode: Clone + PartialEq;
    /// Opaque handle to an open configuration transaction
    type Config;

    /// The main display
    fn main_display(&self) -> DisplayId;

    /// All modes of `display` in the order the OS reports them, `None` if no list could be made
    fn all_modes(&self, display: DisplayId) -> Option<Vec<Self::Mode>>;

    /// The currently active mode of `display`
    fn current_mode(&self, display: DisplayId) -> Option<Self::Mode>;

    /// Reads the attributes of `mode`
    fn describe(&self, mode: &Self::Mode) -> DisplayMode;

    fn acquire_fade_reservation(&self, interval: f32) -> Result<FadeToken, CgError>;

    fn fade(&self, token: FadeToken, fade: &Fade) -> Result<(), CgError>;

    fn release_fade_reservation(&self, token: FadeToken) -> Result<(), CgError>;

    fn begin_configuration(&self) -> Result<Self::Config, CgError>;

    fn configure_mode(
        &self,
        config: &Self::Config,
        display: DisplayId,
        mode: &Self::Mode,
    ) -> Result<(), CgError>;

    fn complete_configuration(
        &self,
        config: &Self::Config,
        option: ConfigureOption,
    ) -> Result<(), CgError>;

    fn cancel_configuration(&self, config: &Self::Config);
}
