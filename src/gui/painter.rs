//! Paints a [`Rendering`] onto an egui painter
//!
//! Shared by the configurator preview and the overlay window. Effects are
//! applied here, per frame; the rendering itself stays untouched.

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Stroke, StrokeKind};

use crate::color::HexColor;
use crate::constants::defaults;
use crate::effects::EffectFrame;
use crate::render::{Bounds, DrawCommand, Paint, Rendering, Role, Shape};

/// Paint every command with `origin` as the viewport centre
pub fn paint(painter: &Painter, origin: Pos2, rendering: &Rendering, frame: EffectFrame) {
    for command in &rendering.commands {
        let (min, size) = scaled_bounds(&command.bounds, rendering.center, frame.scale);
        let rect = Rect::from_min_size(origin + egui::vec2(min.0, min.1), egui::vec2(size.0, size.1));
        let color = command_color(command, frame);

        match (command.shape, command.paint) {
            (Shape::Rect, Paint::Fill) => {
                painter.rect_filled(rect, CornerRadius::ZERO, color);
            }
            (Shape::Rect, Paint::Stroke { width }) => {
                painter.rect_stroke(rect, CornerRadius::ZERO, Stroke::new(width, color), StrokeKind::Middle);
            }
            (Shape::Ellipse, Paint::Fill) => {
                painter.circle_filled(rect.center(), rect.width() / 2.0, color);
            }
            (Shape::Ellipse, Paint::Stroke { width }) => {
                painter.circle_stroke(rect.center(), rect.width() / 2.0, Stroke::new(width, color));
            }
        }
    }
}

/// Bounds scaled around the crosshair centre: `(min corner, size)`
pub(crate) fn scaled_bounds(bounds: &Bounds, center: (f32, f32), scale: f32) -> ((f32, f32), (f32, f32)) {
    let min = (
        center.0 + (bounds.x - center.0) * scale,
        center.1 + (bounds.y - center.1) * scale,
    );
    (min, (bounds.width * scale, bounds.height * scale))
}

/// Final colour for a command, with dynamic colour and pulse opacity applied.
/// The outline halo keeps its own colour.
pub(crate) fn command_color(command: &DrawCommand, frame: EffectFrame) -> Color32 {
    let base = match frame.color_override {
        Some(cycled) if command.role != Role::Outline => cycled,
        _ => HexColor::parse(&command.color)
            .or_else(|| HexColor::parse(defaults::COLOR))
            .unwrap_or(HexColor::BLACK),
    };

    let opacity = (command.opacity as f32 * frame.opacity_factor).clamp(0.0, 1.0);
    let alpha = (f32::from(base.a) * opacity).round() as u8;
    Color32::from_rgba_unmultiplied(base.r, base.g, base.b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrosshairSettings;
    use crate::render::render;

    #[test]
    fn test_identity_scale_keeps_bounds() {
        let bounds = Bounds { x: -20.0, y: -1.0, width: 17.0, height: 2.0 };
        assert_eq!(scaled_bounds(&bounds, (0.0, 0.0), 1.0), ((-20.0, -1.0), (17.0, 2.0)));
    }

    #[test]
    fn test_scale_is_around_crosshair_centre() {
        let bounds = Bounds::centered(10.0, 10.0, 20.0, 20.0);
        let ((x, y), (w, h)) = scaled_bounds(&bounds, (10.0, 10.0), 0.5);
        assert_eq!((x, y, w, h), (5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_command_color_applies_opacity() {
        let mut settings = CrosshairSettings::default();
        settings.opacity = 0.5;
        let rendering = render(&settings);

        let color = command_color(&rendering.commands[0], EffectFrame::IDENTITY);
        assert_eq!(color, Color32::from_rgba_unmultiplied(0x00, 0xFF, 0x41, 128));
    }

    #[test]
    fn test_dynamic_color_skips_outline() {
        let mut settings = CrosshairSettings::default();
        settings.modules.outline = true;
        let rendering = render(&settings);
        let frame = EffectFrame {
            color_override: Some(HexColor::rgb(0, 0, 255)),
            ..EffectFrame::IDENTITY
        };

        let halo = command_color(&rendering.commands[0], frame);
        let bar = command_color(&rendering.commands[1], frame);
        assert_eq!((halo.r(), halo.g(), halo.b()), (0, 0, 0));
        assert_eq!((bar.r(), bar.g(), bar.b()), (0, 0, 255));
    }
}
