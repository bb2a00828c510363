//! # StarKit
//!
//! An editor for parametric rounded stars: place a star on the canvas,
//! reshape it through its `radius`, `depth` and `spokes` handles, move and
//! scale it with the native handles, and undo/redo every step.
//!
//! ## Architecture
//!
//! StarKit is organized as a workspace with multiple crates:
//!
//! 1. **starkit-core** - Error types, the event bus, shared-state aliases
//! 2. **starkit-settings** - Editor configuration (JSON/TOML)
//! 3. **starkit-designer** - Geometry, handles, history, canvas and scene controller
//! 4. **starkit** - Line-oriented shell that drives the scene controller

pub mod shell;

pub use starkit_designer as designer;

pub use starkit_core::{Error, EventFilter, HistoryError, Result, SceneError};
pub use starkit_designer::{
    CanvasEvent, EventCategory, HandleKey, ObjectId, Point, SceneController, StarParameters,
};
pub use starkit_settings::Config;

pub use shell::{Reply, Shell, ShellCommand};

use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so it does not mix with shell replies
/// - RUST_LOG environment variable support, warnings by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Load the configuration from `path`, or from the platform default
/// location when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("starkit.toml");
        std::fs::write(&path, "[star]\nspoke_count = 12\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.star.spoke_count, 12);
        assert_eq!(config.history.capacity, 100);
    }

    #[test]
    fn test_load_config_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("starkit.yaml");
        std::fs::write(&path, "star: {}\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }
}
