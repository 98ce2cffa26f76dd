pub mod crosshair_settings;
pub mod module_toggles;
pub mod preview;
