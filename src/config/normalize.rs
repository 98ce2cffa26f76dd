//! Merging externally-sourced settings over the defaults
//!
//! Anything that arrives from a store, a file or the socket goes through
//! [`CrosshairSettings::normalize`] before it reaches the model or the UI.
//! Missing, extra and wrong-shaped fields never fail: each field that can't be
//! coerced keeps its default.

use serde_json::Value;
use tracing::{debug, warn};

use super::settings::{CrosshairSettings, Field, ModuleName};
use crate::constants::limits::*;

/// Integer from a JSON number or numeric string, rounding fractions
pub(crate) fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    }
}

/// Non-negative integer; negative input saturates to zero
pub(crate) fn coerce_unsigned(value: &Value) -> Option<u32> {
    coerce_integer(value).map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
}

pub(crate) fn coerce_signed(value: &Value) -> Option<i32> {
    coerce_integer(value).map(|n| n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Opacity fraction in [0,1] from a number or a string such as `"0.5"` or `"50%"`
pub(crate) fn coerce_opacity(value: &Value) -> Option<f64> {
    let fraction = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_suffix('%') {
                Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
                None => s.parse::<f64>().ok(),
            }
        }
        _ => None,
    }?;

    fraction.is_finite().then(|| fraction.clamp(0.0, 1.0))
}

fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

impl CrosshairSettings {
    /// Merge a partial or foreign settings object over the defaults.
    ///
    /// The result always has every field present and within the ranges the
    /// configurator controls offer. Applying it to its own serialized form is
    /// a no-op.
    pub fn normalize(raw: &Value) -> Self {
        let mut settings = Self::default();

        let Some(fields) = raw.as_object() else {
            if !raw.is_null() {
                warn!(kind = json_kind(raw), "Settings payload is not an object, using defaults");
            }
            return settings;
        };

        for field in Field::ALL {
            let Some(value) = fields.get(field.key()) else {
                continue;
            };
            if let Err(e) = settings.set(field, value) {
                warn!(field = %field, error = %e, "Ignoring malformed setting, keeping default");
            }
        }

        match fields.get("modules") {
            Some(Value::Object(modules)) => {
                for name in ModuleName::ALL {
                    match modules.get(name.key()).map(coerce_flag) {
                        Some(Some(flag)) => *settings.modules.get_mut(name) = flag,
                        Some(None) => warn!(module = %name, "Ignoring malformed module flag"),
                        None => {}
                    }
                }
            }
            Some(other) if !other.is_null() => {
                warn!(kind = json_kind(other), "modules is not an object, using default modules");
            }
            _ => debug!("No modules in settings payload, using default modules"),
        }

        settings.validate_and_clamp();
        settings
    }

    /// Clamp values to the ranges the configurator exposes
    fn validate_and_clamp(&mut self) {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            warn!(size = self.size, min = MIN_SIZE, max = MAX_SIZE, "size out of range, clamping");
            self.size = self.size.clamp(MIN_SIZE, MAX_SIZE);
        }

        if !(MIN_THICKNESS..=MAX_THICKNESS).contains(&self.thickness) {
            warn!(thickness = self.thickness, min = MIN_THICKNESS, max = MAX_THICKNESS, "thickness out of range, clamping");
            self.thickness = self.thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        }

        if self.gap > MAX_GAP {
            warn!(gap = self.gap, max = MAX_GAP, "gap exceeds maximum, clamping");
            self.gap = MAX_GAP;
        }

        for offset in [&mut self.offset_x, &mut self.offset_y] {
            if !(MIN_OFFSET..=MAX_OFFSET).contains(offset) {
                warn!(offset = *offset, min = MIN_OFFSET, max = MAX_OFFSET, "offset out of range, clamping");
                *offset = (*offset).clamp(MIN_OFFSET, MAX_OFFSET);
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{CrosshairStyle, Modules};
    use serde_json::json;

    #[test]
    fn test_normalize_empty_object_gives_defaults() {
        assert_eq!(CrosshairSettings::normalize(&json!({})), CrosshairSettings::default());
    }

    #[test]
    fn test_normalize_non_object_gives_defaults() {
        for raw in [json!(null), json!(42), json!("cross"), json!([1, 2, 3])] {
            assert_eq!(CrosshairSettings::normalize(&raw), CrosshairSettings::default());
        }
    }

    #[test]
    fn test_normalize_every_single_field_partial() {
        let partials = [
            json!({"style": "dot"}),
            json!({"size": 55}),
            json!({"thickness": 6}),
            json!({"gap": 0}),
            json!({"offsetX": 12}),
            json!({"offsetY": -12}),
            json!({"color": "#abcdef"}),
            json!({"opacity": 0.3}),
            json!({"modules": {"pulsing": true}}),
        ];

        for partial in partials {
            let settings = CrosshairSettings::normalize(&partial);
            let value = serde_json::to_value(&settings).unwrap();
            for field in Field::ALL {
                assert!(value.get(field.key()).is_some(), "{field} missing after normalizing {partial}");
            }
            for name in ModuleName::ALL {
                assert!(value["modules"].get(name.key()).is_some(), "{name} missing after normalizing {partial}");
            }
        }
    }

    #[test]
    fn test_normalize_missing_modules_defaults_to_center_dot_only() {
        let settings = CrosshairSettings::normalize(&json!({
            "style": "cross",
            "size": 30,
            "thickness": 3,
            "gap": 2,
            "offsetX": 0,
            "offsetY": 0,
            "color": "#ffffff",
            "opacity": 0.8
        }));

        assert_eq!(
            settings.modules,
            Modules { dynamic_color: false, outline: false, center_dot: true, pulsing: false }
        );
        assert_eq!(settings.size, 30);
    }

    #[test]
    fn test_normalize_partial_modules_merges_over_defaults() {
        let settings = CrosshairSettings::normalize(&json!({"modules": {"outline": true}}));
        assert!(settings.modules.outline);
        assert!(settings.modules.center_dot);
        assert!(!settings.modules.pulsing);

        let settings = CrosshairSettings::normalize(&json!({"modules": {"centerDot": false, "glow": true}}));
        assert!(!settings.modules.center_dot);
    }

    #[test]
    fn test_normalize_wrong_shapes_fall_back_per_field() {
        let settings = CrosshairSettings::normalize(&json!({
            "style": 3,
            "size": "big",
            "thickness": [1],
            "gap": "4",
            "color": "chartreuse-ish",
            "opacity": "75%",
            "modules": "all of them",
            "extra": {"ignored": true}
        }));

        assert_eq!(settings.style, CrosshairStyle::Cross);
        assert_eq!(settings.size, 20);
        assert_eq!(settings.thickness, 2);
        assert_eq!(settings.gap, 4);
        assert_eq!(settings.color, "#00ff41");
        assert_eq!(settings.opacity, 0.75);
        assert_eq!(settings.modules, Modules::default());
    }

    #[test]
    fn test_normalize_clamps_out_of_range_values() {
        let settings = CrosshairSettings::normalize(&json!({
            "size": -5,
            "thickness": 0,
            "gap": -1,
            "offsetX": 9000,
            "offsetY": -9000,
            "opacity": 3.5
        }));

        assert_eq!(settings.size, MIN_SIZE);
        assert_eq!(settings.thickness, MIN_THICKNESS);
        assert_eq!(settings.gap, 0);
        assert_eq!(settings.offset_x, MAX_OFFSET);
        assert_eq!(settings.offset_y, MIN_OFFSET);
        assert_eq!(settings.opacity, 1.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            json!({}),
            json!({"style": "SQUARE", "size": "33", "color": "#ABC", "opacity": "12%"}),
            json!({"size": 500, "gap": 99, "opacity": 0.333, "modules": {"dynamicColor": 1}}),
            CrosshairSettings::default().to_value(),
        ];

        for raw in inputs {
            let once = CrosshairSettings::normalize(&raw);
            let twice = CrosshairSettings::normalize(&once.to_value());
            assert_eq!(once, twice, "normalize not idempotent for {raw}");
        }
    }

    #[test]
    fn test_coerce_opacity_forms() {
        assert_eq!(coerce_opacity(&json!(0.4)), Some(0.4));
        assert_eq!(coerce_opacity(&json!("40%")), Some(0.4));
        assert_eq!(coerce_opacity(&json!(" 0.4 ")), Some(0.4));
        assert_eq!(coerce_opacity(&json!(-1)), Some(0.0));
        assert_eq!(coerce_opacity(&json!("opaque")), None);
        assert_eq!(coerce_opacity(&json!(null)), None);
    }
}
