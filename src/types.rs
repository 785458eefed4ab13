use core::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use thiserror::Error;

/// Identifies a display (`CGDirectDisplayID`)
pub type DisplayId = u32;

/// Colour depth of a display mode, derived from its pixel encoding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelDepth {
    Bits8,
    Bits16,
    Bits32,
    Unknown,
}

const IO_8BIT_INDEXED_PIXELS: &str = "PPPPPPPP";
const IO_16BIT_DIRECT_PIXELS: &str = "-RRRRRGGGGGBBBBB";
const IO_32BIT_DIRECT_PIXELS: &str = "--------RRRRRRRRGGGGGGGGBBBBBBBB";

impl PixelDepth {
    /// Maps an IOKit pixel encoding string to a depth
    pub fn from_encoding(encoding: Option<&str>) -> Self {
        match encoding {
            Some(e) if e.eq_ignore_ascii_case(IO_32BIT_DIRECT_PIXELS) => PixelDepth::Bits32,
            Some(e) if e.eq_ignore_ascii_case(IO_16BIT_DIRECT_PIXELS) => PixelDepth::Bits16,
            Some(e) if e.eq_ignore_ascii_case(IO_8BIT_INDEXED_PIXELS) => PixelDepth::Bits8,
            _ => PixelDepth::Unknown,
        }
    }

    /// Number of bits per pixel, 0 if unknown
    pub fn bits(self) -> u32 {
        match self {
            PixelDepth::Bits8 => 8,
            PixelDepth::Bits16 => 16,
            PixelDepth::Bits32 => 32,
            PixelDepth::Unknown => 0,
        }
    }
}

impl fmt::Display for PixelDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // forward so width specifiers apply to the number
        fmt::Display::fmt(&self.bits(), f)
    }
}

/// The attributes of a display mode as reported by the OS
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    /// Logical width in points
    pub width: usize,
    /// Logical height in points
    pub height: usize,
    /// Physical width in pixels
    pub pixel_width: usize,
    pub depth: PixelDepth,
}

impl DisplayMode {
    pub fn new(width: usize, height: usize, pixel_width: usize, depth: PixelDepth) -> Self {
        Self {
            width,
            height,
            pixel_width,
            depth,
        }
    }

    /// Pixel density ratio: physical width divided by logical width
    pub fn density(&self) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        self.pixel_width as f64 / self.width as f64
    }
}

/// One line of the mode listing
#[derive(Debug, Clone, Copy)]
pub struct ModeLine<'a> {
    pub index: usize,
    pub mode: &'a DisplayMode,
    pub current: bool,
}

impl<'a> ModeLine<'a> {
    pub fn new(index: usize, mode: &'a DisplayMode, current: bool) -> Self {
        Self {
            index,
            mode,
            current,
        }
    }
}

impl fmt::Display for ModeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.current { '*' } else { ' ' };
        write!(
            f,
            "{}{:3}: {:4} x {:4} - {:2}bit - @{:.0}x",
            marker,
            self.index,
            self.mode.width,
            self.mode.height,
            self.mode.depth,
            self.mode.density()
        )
    }
}

/// Errors that occur while parsing a mode index from a string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIndexError {
    #[error("invalid argument. \"{0}\"")]
    Invalid(String),
    #[error("argument value is greater than value that can be represented. \"{0}\"")]
    TooLarge(String),
    #[error("argument value is less than value that can be represented. \"{0}\"")]
    TooSmall(String),
    #[error("index is less than 0. ({0})")]
    Negative(i64),
}

/// Index of a mode in the list reported for a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeIndex(usize);

impl ModeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModeIndex {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: i64 = s.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => ParseIndexError::TooLarge(s.to_string()),
            IntErrorKind::NegOverflow => ParseIndexError::TooSmall(s.to_string()),
            _ => ParseIndexError::Invalid(s.to_string()),
        })?;

        if value < 0 {
            return Err(ParseIndexError::Negative(value));
        }

        usize::try_from(value)
            .map(Self)
            .map_err(|_| ParseIndexError::TooLarge(s.to_string()))
    }
}
