//! GUI-specific constants for layout and colors

/// Configurator window dimensions
pub const WINDOW_WIDTH: f32 = 520.0;
pub const WINDOW_HEIGHT: f32 = 820.0;
pub const WINDOW_MIN_WIDTH: f32 = 420.0;
pub const WINDOW_MIN_HEIGHT: f32 = 600.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const LABEL_WIDTH: f32 = 90.0;

/// Preview area
pub const PREVIEW_HEIGHT: f32 = 260.0;
pub const PREVIEW_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(32, 36, 44);
pub const PREVIEW_GUIDE: egui::Color32 = egui::Color32::from_rgba_premultiplied(60, 60, 60, 60);

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_INFO: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
