//! `DisplayService` backed by the CoreGraphics display configuration API.

use core_foundation::array::CFArray;
use core_foundation::base::{CFEqual, CFRetain, CFType, CFTypeRef, TCFType};
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::display::{
    CGAcquireDisplayFadeReservation, CGConfigureOption, CGDisplay, CGDisplayConfigRef,
    CGDisplayCopyAllDisplayModes, CGDisplayFade, CGDisplayMode, CGDisplayModeCopyPixelEncoding,
    CGReleaseDisplayFadeReservation, boolean_t, kCGDisplayShowDuplicateLowResolutionModes,
};
use foreign_types::ForeignType;

use crate::service::{CgError, ConfigureOption, DisplayService, Fade, FadeToken, check};
use crate::types::{DisplayId, DisplayMode, PixelDepth};

/// A retained `CGDisplayModeRef`
#[derive(Clone)]
pub struct CgDisplayMode(CGDisplayMode);

impl CgDisplayMode {
    fn as_type_ref(&self) -> CFTypeRef {
        self.0.as_ptr() as CFTypeRef
    }
}

impl PartialEq for CgDisplayMode {
    fn eq(&self, other: &Self) -> bool {
        unsafe { CFEqual(self.as_type_ref(), other.as_type_ref()) != 0 }
    }
}

impl From<ConfigureOption> for CGConfigureOption {
    fn from(option: ConfigureOption) -> Self {
        match option {
            ConfigureOption::ForAppOnly => CGConfigureOption::ConfigureForAppOnly,
            ConfigureOption::ForSession => CGConfigureOption::ConfigureForSession,
            ConfigureOption::Permanently => CGConfigureOption::ConfigurePermanently,
        }
    }
}

/// The CoreGraphics display configuration service
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphics;

impl CoreGraphics {
    pub fn new() -> Self {
        Self
    }

    /// Options asking for the duplicate low resolution (HiDPI) modes as well
    fn all_modes_options() -> CFDictionary<CFString, CFNumber> {
        let key = unsafe { CFString::wrap_under_get_rule(kCGDisplayShowDuplicateLowResolutionModes) };
        CFDictionary::from_CFType_pairs(&[(key, CFNumber::from(1i32))])
    }
}

impl DisplayService for CoreGraphics {
    type Mode = CgDisplayMode;
    type Config = CGDisplayConfigRef;

    fn main_display(&self) -> DisplayId {
        CGDisplay::main().id
    }

    fn all_modes(&self, display: DisplayId) -> Option<Vec<Self::Mode>> {
        // `CGDisplayMode::all_display_modes` adopts the array's elements without retaining
        // them, so each mode is retained here before the array releases it.
        let options = Self::all_modes_options();
        let array = unsafe { CGDisplayCopyAllDisplayModes(display, options.as_concrete_TypeRef()) };
        if array.is_null() {
            return None;
        }

        let array: CFArray<CFType> = unsafe { CFArray::wrap_under_create_rule(array) };
        let modes = array
            .iter()
            .map(|mode| unsafe {
                let retained = CFRetain(mode.as_CFTypeRef());
                CgDisplayMode(CGDisplayMode::from_ptr(retained as *mut _))
            })
            .collect();
        Some(modes)
    }

    fn current_mode(&self, display: DisplayId) -> Option<Self::Mode> {
        CGDisplay::new(display).display_mode().map(CgDisplayMode)
    }

    fn describe(&self, mode: &Self::Mode) -> DisplayMode {
        let encoding = unsafe { CGDisplayModeCopyPixelEncoding(mode.0.as_ptr()) };
        let encoding = if encoding.is_null() {
            None
        } else {
            Some(unsafe { CFString::wrap_under_create_rule(encoding) }.to_string())
        };

        DisplayMode::new(
            mode.0.width() as usize,
            mode.0.height() as usize,
            mode.0.pixel_width() as usize,
            PixelDepth::from_encoding(encoding.as_deref()),
        )
    }

    fn acquire_fade_reservation(&self, interval: f32) -> Result<FadeToken, CgError> {
        let mut token = 0;
        check(unsafe { CGAcquireDisplayFadeReservation(interval, &mut token) })?;
        Ok(FadeToken(token))
    }

    fn fade(&self, token: FadeToken, fade: &Fade) -> Result<(), CgError> {
        let (red, green, blue) = fade.color;
        check(unsafe {
            CGDisplayFade(
                token.0,
                fade.duration,
                fade.from,
                fade.to,
                red,
                green,
                blue,
                fade.synchronous as boolean_t,
            )
        })
    }

    fn release_fade_reservation(&self, token: FadeToken) -> Result<(), CgError> {
        check(unsafe { CGReleaseDisplayFadeReservation(token.0) })
    }

    fn begin_configuration(&self) -> Result<Self::Config, CgError> {
        CGDisplay::main().begin_configuration().map_err(CgError)
    }

    fn configure_mode(
        &self,
        config: &Self::Config,
        display: DisplayId,
        mode: &Self::Mode,
    ) -> Result<(), CgError> {
        CGDisplay::new(display)
            .configure_display_with_display_mode(config, &mode.0)
            .map_err(CgError)
    }

    fn complete_configuration(
        &self,
        config: &Self::Config,
        option: ConfigureOption,
    ) -> Result<(), CgError> {
        CGDisplay::main()
            .complete_configuration(config, option.into())
            .map_err(CgError)
    }

    fn cancel_configuration(&self, config: &Self::Config) {
        if let Err(code) = CGDisplay::main().cancel_configuration(config) {
            log::warn!("Canceling display configuration returned code {}", code);
        }
    }
}
