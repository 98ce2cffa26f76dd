//! Time-based effects applied by the presentation layer
//!
//! The renderer only marks which effects are active; the animation itself is
//! computed here from the elapsed time and applied while painting.

use std::f32::consts::TAU;

use crate::color::HexColor;
use crate::constants::effects::*;
use crate::render::EffectMarkers;

/// Per-frame adjustments derived from the active effect markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectFrame {
    /// Replaces every primary command's colour when set
    pub color_override: Option<HexColor>,
    /// Geometry scale around the crosshair centre
    pub scale: f32,
    /// Multiplies every command's opacity
    pub opacity_factor: f32,
}

impl EffectFrame {
    pub const IDENTITY: EffectFrame = EffectFrame {
        color_override: None,
        scale: 1.0,
        opacity_factor: 1.0,
    };

    pub fn at(markers: EffectMarkers, elapsed_secs: f32) -> Self {
        let mut frame = Self::IDENTITY;

        if markers.dynamic_color {
            frame.color_override = Some(cycle_color(elapsed_secs));
        }

        if markers.pulsing {
            let phase = pulse_phase(elapsed_secs);
            frame.scale = PULSE_MIN_SCALE + PULSE_SCALE_RANGE * phase;
            frame.opacity_factor = PULSE_MIN_OPACITY + PULSE_OPACITY_RANGE * phase;
        }

        frame
    }
}

/// Fully saturated colour whose hue advances at a fixed rate
pub fn cycle_color(elapsed_secs: f32) -> HexColor {
    let hue = (elapsed_secs * HUE_DEGREES_PER_SECOND).rem_euclid(360.0);
    HexColor::from_hsv(hue, 1.0, 1.0)
}

/// Position within the pulse, 0.0 (smallest) to 1.0 (largest)
pub fn pulse_phase(elapsed_secs: f32) -> f32 {
    0.5 + 0.5 * (elapsed_secs * TAU / PULSE_PERIOD_SECS).sin()
}
