//! Core types shared by the Flightdeck crates.
//!
//! This crate provides the pieces every other crate leans on:
//! - The engine-wide [`Error`] and [`Result`] types
//! - The [`ConfigStore`] seam through which bindings are persisted

pub mod config;
pub mod error;

pub use config::{ConfigStore, IniConfig, MemoryConfig};
pub use error::{Error, Result};

/// Well-known configuration keys.
pub mod keys {
    /// Whether joystick input is processed at all (`0` or `1`).
    pub const ENABLE_JOYSTICK: &str = "EnableJoystick";
    /// Whether reported mouse motion on the Y axis is inverted (`0` or `1`).
    pub const INVERT_MOUSE_Y: &str = "InvertMouseY";
}
