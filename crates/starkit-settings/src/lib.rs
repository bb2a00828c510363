//! StarKit Settings Crate
//!
//! Handles editor configuration: history limits, canvas size, the default
//! star parameters and the object/handle style.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, HistorySettings, ObjectStyle, StarDefaults};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
