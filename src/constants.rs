//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// File locations and storage keys
pub mod config {
    /// Directory under the user config dir
    pub const APP_DIR: &str = "crosshair-overlay";

    /// Config file watched by the overlay (also the static load fallback)
    pub const FILENAME: &str = "config.json";

    /// Key-value file used by the local settings store
    pub const STORAGE_FILENAME: &str = "storage.json";

    /// Key the settings object is stored under in the key-value file
    pub const STORAGE_KEY: &str = "crosshair_config";
}

/// Factory defaults for a fresh or reset crosshair
pub mod defaults {
    pub const SIZE: u32 = 20;
    pub const THICKNESS: u32 = 2;
    pub const GAP: u32 = 3;
    pub const OFFSET_X: i32 = 0;
    pub const OFFSET_Y: i32 = 0;
    pub const COLOR: &str = "#00ff41";
    pub const OPACITY: f64 = 1.0;
}

/// Ranges offered by the configurator controls
pub mod limits {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 100;

    pub const MIN_THICKNESS: u32 = 1;
    pub const MAX_THICKNESS: u32 = 20;

    pub const MIN_GAP: u32 = 0;
    pub const MAX_GAP: u32 = 50;

    pub const MIN_OFFSET: i32 = -500;
    pub const MAX_OFFSET: i32 = 500;

    pub const MAX_OPACITY_PERCENT: u8 = 100;
}

/// Halo drawn by the outline module
pub mod outline {
    /// Extra pixels added to the primary shape's extent
    pub const MARGIN: u32 = 4;

    /// Stroke width of the halo
    pub const STROKE_WIDTH: f32 = 2.0;

    /// Lowest opacity the halo may fade to
    pub const MIN_OPACITY: f64 = 0.2;

    /// Halo opacity relative to the crosshair opacity
    pub const OPACITY_FACTOR: f64 = 0.7;

    pub const COLOR: &str = "#000000";
}

/// Continuous effects applied by the presentation layer
pub mod effects {
    /// Hue rotation speed for dynamic colour (degrees per second)
    pub const HUE_DEGREES_PER_SECOND: f32 = 60.0;

    /// Duration of one full pulse (seconds)
    pub const PULSE_PERIOD_SECS: f32 = 1.2;

    /// Geometry scale at the bottom of a pulse, and the swing above it
    pub const PULSE_MIN_SCALE: f32 = 0.9;
    pub const PULSE_SCALE_RANGE: f32 = 0.2;

    /// Opacity factor at the bottom of a pulse, and the swing above it
    pub const PULSE_MIN_OPACITY: f32 = 0.6;
    pub const PULSE_OPACITY_RANGE: f32 = 0.4;
}

/// Overlay daemon timing
pub mod timing {
    /// Interval between config file modification checks
    pub const CONFIG_POLL_MS: u64 = 400;

    /// Repaint interval while an effect is animating
    pub const FRAME_MS: u64 = 16;
}

/// Host backend socket
pub mod ipc {
    /// Socket path relative to the runtime (or cache) dir
    pub const SOCKET_PATH: &str = "crosshair-overlay/overlay.sock";

    /// Largest accepted message body
    pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Connect/read timeout used by the configurator side
    pub const CLIENT_TIMEOUT_MS: u64 = 500;

    /// How long the overlay waits on a silent client before dropping it
    pub const SERVER_READ_TIMEOUT_MS: u64 = 2000;
}
