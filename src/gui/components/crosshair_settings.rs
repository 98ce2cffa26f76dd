//! Controls for the crosshair geometry, colour and opacity

use eframe::egui;
use serde_json::{json, Value};
use std::ops::RangeInclusive;

use crate::color::HexColor;
use crate::config::{CrosshairSettings, CrosshairStyle, Field};
use crate::constants::{defaults, limits::*};
use crate::gui::constants::{ITEM_SPACING, LABEL_WIDTH};

/// Renders the crosshair controls and returns the field edits made this frame
pub fn ui(ui: &mut egui::Ui, settings: &CrosshairSettings) -> Vec<(Field, Value)> {
    let mut edits = Vec::new();

    ui.group(|ui| {
        ui.label(egui::RichText::new("Crosshair").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 18.0], egui::Label::new("Style:"));
            let mut style = settings.style;
            egui::ComboBox::from_id_salt("crosshair_style")
                .selected_text(style.label())
                .show_ui(ui, |ui| {
                    for option in CrosshairStyle::ALL {
                        if ui.selectable_value(&mut style, option, option.label()).changed() {
                            edits.push((Field::Style, json!(style.as_str())));
                        }
                    }
                });
        });

        slider_row(ui, &mut edits, Field::Size, "Size:", settings.size, MIN_SIZE..=MAX_SIZE, " px");
        slider_row(
            ui,
            &mut edits,
            Field::Thickness,
            "Thickness:",
            settings.thickness,
            MIN_THICKNESS..=MAX_THICKNESS,
            " px",
        );

        // Gap only shapes the cross style
        ui.add_enabled_ui(settings.style == CrosshairStyle::Cross, |ui| {
            slider_row(ui, &mut edits, Field::Gap, "Gap:", settings.gap, MIN_GAP..=MAX_GAP, " px");
        });

        ui.add_space(ITEM_SPACING);

        slider_row(ui, &mut edits, Field::OffsetX, "Offset X:", settings.offset_x, MIN_OFFSET..=MAX_OFFSET, " px");
        slider_row(ui, &mut edits, Field::OffsetY, "Offset Y:", settings.offset_y, MIN_OFFSET..=MAX_OFFSET, " px");

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 18.0], egui::Label::new("Color:"));

            let current = HexColor::parse(&settings.color)
                .or_else(|| HexColor::parse(defaults::COLOR))
                .unwrap_or(HexColor::BLACK);
            let mut rgb = [current.r, current.g, current.b];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                let hex = HexColor { r: rgb[0], g: rgb[1], b: rgb[2], a: current.a }.to_hex();
                edits.push((Field::Color, json!(hex)));
            }
            ui.monospace(settings.color.as_str());
        });

        // The UI speaks percent; the model stores a fraction
        slider_row(
            ui,
            &mut edits,
            Field::Opacity,
            "Opacity:",
            settings.opacity_percent(),
            0..=MAX_OPACITY_PERCENT,
            "%",
        );
    });

    edits
}

fn slider_row<N: egui::emath::Numeric + std::fmt::Display>(
    ui: &mut egui::Ui,
    edits: &mut Vec<(Field, Value)>,
    field: Field,
    label: &str,
    current: N,
    range: RangeInclusive<N>,
    suffix: &str,
) {
    let mut value = current;
    let changed = ui
        .horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 18.0], egui::Label::new(label));
            ui.add(egui::Slider::new(&mut value, range).suffix(suffix)).changed()
        })
        .inner;

    if changed {
        edits.push((field, slider_value(field, value)));
    }
}

/// Slider output as the value `CrosshairSettings::set` expects
fn slider_value<N: std::fmt::Display>(field: Field, value: N) -> Value {
    match field {
        Field::Opacity => json!(format!("{value}%")),
        _ => json!(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_values_apply_through_set() {
        let mut settings = CrosshairSettings::default();

        settings.set(Field::Size, &slider_value(Field::Size, 64u32)).unwrap();
        settings.set(Field::OffsetX, &slider_value(Field::OffsetX, -120i32)).unwrap();
        settings.set(Field::Opacity, &slider_value(Field::Opacity, 35u8)).unwrap();

        assert_eq!(settings.size, 64);
        assert_eq!(settings.offset_x, -120);
        assert_eq!(settings.opacity_percent(), 35);
    }
}
