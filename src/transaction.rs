//! Scoped wrappers around the fade reservation and the configuration transaction.

use crate::service::{CgError, ConfigureOption, DisplayService, Fade, FadeToken};
use crate::types::DisplayId;

/// A granted fade reservation
///
/// Must be given back with [`FadeReservation::release`]. A reservation dropped without
/// release is left to lapse once its interval runs out.
pub struct FadeReservation<'a, S: DisplayService> {
    service: &'a S,
    token: FadeToken,
    interval: f32,
    released: bool,
}

impl<'a, S: DisplayService> FadeReservation<'a, S> {
    /// Asks the OS for a reservation valid for `interval` seconds
    pub fn acquire(service: &'a S, interval: f32) -> Result<Self, CgError> {
        let token = service.acquire_fade_reservation(interval)?;
        log::debug!("Acquired fade reservation {:?} for {}s", token, interval);
        Ok(Self {
            service,
            token,
            interval,
            released: false,
        })
    }

    pub fn fade(&self, fade: &Fade) -> Result<(), CgError> {
        log::debug!("Fading {:?}: {} -> {}", self.token, fade.from, fade.to);
        self.service.fade(self.token, fade)
    }

    pub fn release(mut self) -> Result<(), CgError> {
        self.released = true;
        self.service.release_fade_reservation(self.token)?;
        log::debug!("Released fade reservation {:?}", self.token);
        Ok(())
    }
}

impl<S: DisplayService> Drop for FadeReservation<'_, S> {
    fn drop(&mut self) {
        if !self.released {
            log::debug!(
                "Fade reservation {:?} not released, it lapses after {}s",
                self.token,
                self.interval
            );
        }
    }
}

/// An open display configuration transaction
///
/// Canceled on drop unless [`ConfigTransaction::complete`] succeeded.
pub struct ConfigTransaction<'a, S: DisplayService> {
    service: &'a S,
    config: S::Config,
    completed: bool,
}

impl<'a, S: DisplayService> ConfigTransaction<'a, S> {
    pub fn begin(service: &'a S) -> Result<Self, CgError> {
        let config = service.begin_configuration()?;
        log::debug!("Began display configuration");
        Ok(Self {
            service,
            config,
            completed: false,
        })
    }

    /// Stages `mode` for `display`
    pub fn configure(&self, display: DisplayId, mode: &S::Mode) -> Result<(), CgError> {
        self.service.configure_mode(&self.config, display, mode)
    }

    /// Applies all staged changes
    pub fn complete(mut self, option: ConfigureOption) -> Result<(), CgError> {
        self.service.complete_configuration(&self.config, option)?;
        self.completed = true;
        log::debug!("Completed display configuration ({:?})", option);
        Ok(())
    }
}

impl<S: DisplayService> Drop for ConfigTransaction<'_, S> {
    fn drop(&mut self) {
        if !self.completed {
            log::debug!("Canceling display configuration");
            self.service.cancel_configuration(&self.config);
        }
    }
}
