//! Crosshair settings model
//!
//! One [`CrosshairSettings`] value is the whole persisted state of the
//! crosshair. The configurator holds a single live instance and mutates it
//! through [`CrosshairSettings::set`], [`CrosshairSettings::toggle_module`] and
//! [`CrosshairSettings::reset`].

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::normalize::{coerce_opacity, coerce_signed, coerce_unsigned};
use crate::color;
use crate::constants::{defaults, limits};

/// Shape family of the crosshair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairStyle {
    #[default]
    Cross,
    Dot,
    Circle,
    Square,
}

impl CrosshairStyle {
    pub const ALL: [CrosshairStyle; 4] = [
        CrosshairStyle::Cross,
        CrosshairStyle::Dot,
        CrosshairStyle::Circle,
        CrosshairStyle::Square,
    ];

    /// Persisted name
    pub fn as_str(&self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "cross",
            CrosshairStyle::Dot => "dot",
            CrosshairStyle::Circle => "circle",
            CrosshairStyle::Square => "square",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "Cross",
            CrosshairStyle::Dot => "Dot",
            CrosshairStyle::Circle => "Circle",
            CrosshairStyle::Square => "Square",
        }
    }
}

impl FromStr for CrosshairStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow!("unknown crosshair style '{wanted}' (expected cross, dot, circle or square)"))
    }
}

/// Optional feature flags altering rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modules {
    pub dynamic_color: bool,
    pub outline: bool,
    pub center_dot: bool,
    pub pulsing: bool,
}

impl Default for Modules {
    fn default() -> Self {
        Self {
            dynamic_color: false,
            outline: false,
            center_dot: true,
            pulsing: false,
        }
    }
}

impl Modules {
    pub fn get(&self, name: ModuleName) -> bool {
        match name {
            ModuleName::DynamicColor => self.dynamic_color,
            ModuleName::Outline => self.outline,
            ModuleName::CenterDot => self.center_dot,
            ModuleName::Pulsing => self.pulsing,
        }
    }

    pub fn get_mut(&mut self, name: ModuleName) -> &mut bool {
        match name {
            ModuleName::DynamicColor => &mut self.dynamic_color,
            ModuleName::Outline => &mut self.outline,
            ModuleName::CenterDot => &mut self.center_dot,
            ModuleName::Pulsing => &mut self.pulsing,
        }
    }
}

/// Identifies one flag in [`Modules`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleName {
    DynamicColor,
    Outline,
    CenterDot,
    Pulsing,
}

impl ModuleName {
    pub const ALL: [ModuleName; 4] = [
        ModuleName::DynamicColor,
        ModuleName::Outline,
        ModuleName::CenterDot,
        ModuleName::Pulsing,
    ];

    /// Key inside the persisted `modules` object
    pub fn key(&self) -> &'static str {
        match self {
            ModuleName::DynamicColor => "dynamicColor",
            ModuleName::Outline => "outline",
            ModuleName::CenterDot => "centerDot",
            ModuleName::Pulsing => "pulsing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModuleName::DynamicColor => "Dynamic Color",
            ModuleName::Outline => "Outline",
            ModuleName::CenterDot => "Center Dot",
            ModuleName::Pulsing => "Pulsing",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModuleName {
    type Err = anyhow::Error;

    /// Accepts `centerDot`, `center_dot`, `center-dot` in any case
    fn from_str(s: &str) -> Result<Self> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|name| squash(name.key()) == wanted)
            .ok_or_else(|| anyhow!("unknown module '{}' (expected dynamicColor, outline, centerDot or pulsing)", s.trim()))
    }
}

/// Scalar fields addressable by [`CrosshairSettings::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Style,
    Size,
    Thickness,
    Gap,
    OffsetX,
    OffsetY,
    Color,
    Opacity,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Style,
        Field::Size,
        Field::Thickness,
        Field::Gap,
        Field::OffsetX,
        Field::OffsetY,
        Field::Color,
        Field::Opacity,
    ];

    /// Key in the persisted settings object
    pub fn key(&self) -> &'static str {
        match self {
            Field::Style => "style",
            Field::Size => "size",
            Field::Thickness => "thickness",
            Field::Gap => "gap",
            Field::OffsetX => "offsetX",
            Field::OffsetY => "offsetY",
            Field::Color => "color",
            Field::Opacity => "opacity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|field| squash(field.key()) == wanted)
            .ok_or_else(|| anyhow!("unknown setting '{}'", s.trim()))
    }
}

fn squash(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Complete crosshair configuration, persisted as a flat JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairSettings {
    pub style: CrosshairStyle,
    pub size: u32,
    pub thickness: u32,
    pub gap: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub color: String,
    /// Always a fraction in [0,1]; percentages only exist at the UI boundary
    pub opacity: f64,
    pub modules: Modules,
}

impl Default for CrosshairSettings {
    fn default() -> Self {
        Self {
            style: CrosshairStyle::Cross,
            size: defaults::SIZE,
            thickness: defaults::THICKNESS,
            gap: defaults::GAP,
            offset_x: defaults::OFFSET_X,
            offset_y: defaults::OFFSET_Y,
            color: defaults::COLOR.to_string(),
            opacity: defaults::OPACITY,
            modules: Modules::default(),
        }
    }
}

impl CrosshairSettings {
    /// Update one field from a loosely-typed value.
    ///
    /// Only type coercion happens here: numbers may arrive as JSON numbers or
    /// numeric strings, opacity may arrive as `"50%"`. Range limits are the
    /// caller's business.
    pub fn set(&mut self, field: Field, value: &Value) -> Result<()> {
        let mismatch = |expected: &str| anyhow!("{field} expects {expected}, got {value}");

        match field {
            Field::Style => {
                let name = value.as_str().ok_or_else(|| mismatch("a style name"))?;
                self.style = name.parse()?;
            }
            Field::Size => self.size = coerce_unsigned(value).ok_or_else(|| mismatch("an integer"))?,
            Field::Thickness => {
                self.thickness = coerce_unsigned(value).ok_or_else(|| mismatch("an integer"))?
            }
            Field::Gap => self.gap = coerce_unsigned(value).ok_or_else(|| mismatch("an integer"))?,
            Field::OffsetX => self.offset_x = coerce_signed(value).ok_or_else(|| mismatch("an integer"))?,
            Field::OffsetY => self.offset_y = coerce_signed(value).ok_or_else(|| mismatch("an integer"))?,
            Field::Color => {
                let raw = value.as_str().ok_or_else(|| mismatch("a hex color string"))?;
                match color::canonicalize(raw) {
                    Some(hex) => self.color = hex,
                    None => bail!("invalid color '{raw}' (expected #rgb, #rrggbb or #rrggbbaa)"),
                }
            }
            Field::Opacity => {
                self.opacity = coerce_opacity(value).ok_or_else(|| mismatch("a fraction or percentage"))?
            }
        }
        Ok(())
    }

    /// Flip a module flag, returning its new state
    pub fn toggle_module(&mut self, name: ModuleName) -> bool {
        let flag = self.modules.get_mut(name);
        *flag = !*flag;
        *flag
    }

    /// Restore the factory defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Opacity as the 0-100 integer shown in the UI
    pub fn opacity_percent(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Store a UI percentage as the persisted fraction
    pub fn set_opacity_percent(&mut self, percent: u8) {
        let percent = percent.min(limits::MAX_OPACITY_PERCENT);
        self.opacity = f64::from(percent) / 100.0;
    }

    /// Persisted JSON form
    pub fn to_value(&self) -> Value {
        // Plain fields with string keys; serialization cannot fail
        serde_json::to_value(self).unwrap_or_default()
    }

    /// True when the presentation layer must keep animating
    pub fn is_animated(&self) -> bool {
        self.modules.dynamic_color || self.modules.pulsing
    }
}
