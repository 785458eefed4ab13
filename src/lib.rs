//! A library to list and switch the display mode of the main display.
//!
//! The operations are written against the [`DisplayService`] trait. On macOS the
//! [`platforms::macos::CoreGraphics`] service binds it to the CoreGraphics display
//! configuration API.

mod command;
mod display;
mod service;
mod transaction;
mod types;

pub mod platforms;

pub use command::*;
pub use display::*;
pub use service::*;
pub use transaction::*;
pub use types::*;
