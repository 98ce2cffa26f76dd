//! Crosshair configuration
//!
//! - **settings**: the settings model and its mutation operations
//! - **normalize**: merging foreign or partial settings objects over the defaults

pub mod normalize;
pub mod settings;

use std::path::PathBuf;

// Re-export commonly used types
pub use settings::{CrosshairSettings, CrosshairStyle, Field, ModuleName, Modules};

/// Per-user application directory (falls back to the working directory)
pub fn app_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(crate::constants::config::APP_DIR);
    path
}

/// Config file watched by the overlay
pub fn config_path() -> PathBuf {
    app_dir().join(crate::constants::config::FILENAME)
}

/// Key-value file backing the local settings store
pub fn storage_path() -> PathBuf {
    app_dir().join(crate::constants::config::STORAGE_FILENAME)
}
