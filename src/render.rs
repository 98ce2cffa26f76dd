//! Crosshair renderer
//!
//! [`render`] is a pure function from settings to a list of draw commands.
//! Every call is a full recompute; the presentation surface decides how to
//! paint the commands (egui painter for both the preview and the overlay).
//!
//! All coordinates are pixels relative to the viewport centre, with the
//! crosshair offsets already applied. `y` grows downwards.

use serde::Serialize;

use crate::config::{CrosshairSettings, CrosshairStyle};
use crate::constants::outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rect,
    Ellipse,
}

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Paint {
    Fill,
    Stroke { width: f32 },
}

/// Which part of the crosshair a command draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Outline,
    HorizontalBar,
    VerticalBar,
    CenterDot,
    Body,
}

/// Axis-aligned box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub role: Role,
    pub shape: Shape,
    pub bounds: Bounds,
    pub paint: Paint,
    /// Hex colour string
    pub color: String,
    pub opacity: f64,
    /// Lower values are painted first
    pub z: i32,
}

/// Continuous effects the presentation layer should animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectMarkers {
    pub dynamic_color: bool,
    pub pulsing: bool,
}

impl EffectMarkers {
    pub fn any(&self) -> bool {
        self.dynamic_color || self.pulsing
    }
}

/// Complete visual description of one crosshair state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendering {
    /// Crosshair centre (viewport centre plus offsets)
    pub center: (f32, f32),
    /// Sorted by `z`
    pub commands: Vec<DrawCommand>,
    pub effects: EffectMarkers,
}

const Z_OUTLINE: i32 = 0;
const Z_BODY: i32 = 1;
const Z_CENTER_DOT: i32 = 2;

pub fn render(settings: &CrosshairSettings) -> Rendering {
    let cx = settings.offset_x as f32;
    let cy = settings.offset_y as f32;
    let size = settings.size as f32;
    let thickness = settings.thickness.max(1) as f32;

    let primary = |role, shape, bounds, paint, z| DrawCommand {
        role,
        shape,
        bounds,
        paint,
        color: settings.color.clone(),
        opacity: settings.opacity,
        z,
    };

    let mut commands = Vec::new();

    if settings.modules.outline {
        commands.push(outline_for(settings, cx, cy));
    }

    match settings.style {
        CrosshairStyle::Cross => {
            // Each half keeps its outer end fixed at `size`; the gap only eats into it
            let segment = settings.size.saturating_sub(settings.gap) as f32;
            if segment > 0.0 {
                let inner = size - segment;
                let halves = [
                    (Role::HorizontalBar, Bounds { x: cx - size, y: cy - thickness / 2.0, width: segment, height: thickness }),
                    (Role::HorizontalBar, Bounds { x: cx + inner, y: cy - thickness / 2.0, width: segment, height: thickness }),
                    (Role::VerticalBar, Bounds { x: cx - thickness / 2.0, y: cy - size, width: thickness, height: segment }),
                    (Role::VerticalBar, Bounds { x: cx - thickness / 2.0, y: cy + inner, width: thickness, height: segment }),
                ];
                for (role, bounds) in halves {
                    commands.push(primary(role, Shape::Rect, bounds, Paint::Fill, Z_BODY));
                }
            }

            if settings.modules.center_dot {
                let dot = Bounds::centered(cx, cy, thickness, thickness);
                commands.push(primary(Role::CenterDot, Shape::Ellipse, dot, Paint::Fill, Z_CENTER_DOT));
            }
        }
        CrosshairStyle::Dot => {
            let diameter = 2.0 * thickness;
            let bounds = Bounds::centered(cx, cy, diameter, diameter);
            commands.push(primary(Role::Body, Shape::Ellipse, bounds, Paint::Fill, Z_BODY));
        }
        CrosshairStyle::Circle => {
            let bounds = Bounds::centered(cx, cy, size, size);
            let paint = Paint::Stroke { width: thickness };
            commands.push(primary(Role::Body, Shape::Ellipse, bounds, paint, Z_BODY));
        }
        CrosshairStyle::Square => {
            let bounds = Bounds::centered(cx, cy, size, size);
            let paint = Paint::Stroke { width: thickness };
            commands.push(primary(Role::Body, Shape::Rect, bounds, paint, Z_BODY));
        }
    }

    commands.sort_by_key(|command| command.z);

    Rendering {
        center: (cx, cy),
        commands,
        effects: EffectMarkers {
            dynamic_color: settings.modules.dynamic_color,
            pulsing: settings.modules.pulsing,
        },
    }
}

/// Halo behind the primary shape, its extent grown by a fixed margin
fn outline_for(settings: &CrosshairSettings, cx: f32, cy: f32) -> DrawCommand {
    let margin = outline::MARGIN;
    let (shape, extent) = match settings.style {
        CrosshairStyle::Cross | CrosshairStyle::Square => (Shape::Rect, settings.size + margin),
        CrosshairStyle::Circle => (Shape::Ellipse, settings.size + margin),
        CrosshairStyle::Dot => (Shape::Ellipse, settings.thickness + margin),
    };
    let extent = extent as f32;

    DrawCommand {
        role: Role::Outline,
        shape,
        bounds: Bounds::centered(cx, cy, extent, extent),
        paint: Paint::Stroke { width: outline::STROKE_WIDTH },
        color: outline::COLOR.to_string(),
        opacity: (settings.opacity * outline::OPACITY_FACTOR).max(outline::MIN_OPACITY),
        z: Z_OUTLINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Bounds {
        fn right(&self) -> f32 {
            self.x + self.width
        }

        fn center(&self) -> (f32, f32) {
            (self.x + self.width / 2.0, self.y + self.height / 2.0)
        }
    }
    use crate::config::ModuleName;

    fn by_role(rendering: &Rendering, role: Role) -> Vec<&DrawCommand> {
        rendering.commands.iter().filter(|c| c.role == role).collect()
    }

    fn horizontal_extent(rendering: &Rendering) -> (f32, f32) {
        let bars = by_role(rendering, Role::HorizontalBar);
        let left = bars.iter().map(|c| c.bounds.x).fold(f32::INFINITY, f32::min);
        let right = bars.iter().map(|c| c.bounds.right()).fold(f32::NEG_INFINITY, f32::max);
        (left, right)
    }

    #[test]
    fn test_reset_then_render_gives_default_visual() {
        let mut settings = CrosshairSettings::default();
        settings.style = CrosshairStyle::Circle;
        settings.size = 90;
        settings.toggle_module(ModuleName::Outline);
        settings.reset();

        let rendering = render(&settings);
        assert_eq!(rendering, render(&CrosshairSettings::default()));

        // Four bar halves of 20 - 3 px plus the centre dot
        assert_eq!(rendering.commands.len(), 5);
        for bar in by_role(&rendering, Role::HorizontalBar) {
            assert_eq!(bar.bounds.width, 17.0);
            assert_eq!(bar.bounds.height, 2.0);
        }
        for bar in by_role(&rendering, Role::VerticalBar) {
            assert_eq!(bar.bounds.width, 2.0);
            assert_eq!(bar.bounds.height, 17.0);
        }
        let dot = by_role(&rendering, Role::CenterDot);
        assert_eq!(dot.len(), 1);
        assert_eq!(dot[0].bounds, Bounds::centered(0.0, 0.0, 2.0, 2.0));

        assert!(rendering.commands.iter().all(|c| c.color == "#00ff41" && c.opacity == 1.0));
        assert_eq!(rendering.effects, EffectMarkers::default());
    }

    #[test]
    fn test_cross_gap_changes_only_empty_zone() {
        let mut settings = CrosshairSettings::default();
        settings.size = 30;

        for gap in [0, 5, 12] {
            settings.gap = gap;
            let rendering = render(&settings);

            for bar in by_role(&rendering, Role::HorizontalBar) {
                assert_eq!(bar.bounds.width, (30 - gap) as f32);
            }
            let (left, right) = horizontal_extent(&rendering);
            assert_eq!(right - left, 60.0);

            let bars = by_role(&rendering, Role::HorizontalBar);
            let empty_zone = bars[1].bounds.x - bars[0].bounds.right();
            assert_eq!(empty_zone, 2.0 * gap as f32);
        }
    }

    #[test]
    fn test_cross_gap_at_least_size_draws_no_bars() {
        let mut settings = CrosshairSettings::default();
        settings.size = 5;
        settings.gap = 9;

        let rendering = render(&settings);
        assert!(by_role(&rendering, Role::HorizontalBar).is_empty());
        assert!(by_role(&rendering, Role::VerticalBar).is_empty());
        assert_eq!(by_role(&rendering, Role::CenterDot).len(), 1);
    }

    #[test]
    fn test_circle_scenario_suppresses_cross_parts() {
        let mut settings = CrosshairSettings::default();
        settings.style = CrosshairStyle::Circle;
        settings.size = 40;
        settings.thickness = 4;
        settings.color = "#ff0000".to_string();
        settings.opacity = 0.5;

        for center_dot in [true, false] {
            settings.modules.center_dot = center_dot;
            let rendering = render(&settings);

            assert_eq!(rendering.commands.len(), 1);
            let ring = &rendering.commands[0];
            assert_eq!(ring.role, Role::Body);
            assert_eq!(ring.shape, Shape::Ellipse);
            assert_eq!(ring.bounds.width, 40.0);
            assert_eq!(ring.bounds.height, 40.0);
            assert_eq!(ring.paint, Paint::Stroke { width: 4.0 });
            assert_eq!(ring.color, "#ff0000");
            assert_eq!(ring.opacity, 0.5);
        }
    }

    #[test]
    fn test_dot_diameter_is_twice_thickness() {
        let mut settings = CrosshairSettings::default();
        settings.style = CrosshairStyle::Dot;
        settings.thickness = 5;

        let rendering = render(&settings);
        assert_eq!(rendering.commands.len(), 1);
        assert_eq!(rendering.commands[0].shape, Shape::Ellipse);
        assert_eq!(rendering.commands[0].paint, Paint::Fill);
        assert_eq!(rendering.commands[0].bounds, Bounds::centered(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_square_is_stroked_rect() {
        let mut settings = CrosshairSettings::default();
        settings.style = CrosshairStyle::Square;
        settings.size = 24;
        settings.thickness = 3;

        let rendering = render(&settings);
        assert_eq!(rendering.commands.len(), 1);
        let square = &rendering.commands[0];
        assert_eq!(square.shape, Shape::Rect);
        assert_eq!(square.paint, Paint::Stroke { width: 3.0 });
        assert_eq!(square.bounds, Bounds::centered(0.0, 0.0, 24.0, 24.0));
    }

    #[test]
    fn test_offsets_recenter_every_command() {
        let mut settings = CrosshairSettings::default();
        settings.offset_x = 15;
        settings.offset_y = -8;
        settings.modules.outline = true;

        let rendering = render(&settings);
        assert_eq!(rendering.center, (15.0, -8.0));

        let dot = by_role(&rendering, Role::CenterDot)[0];
        assert_eq!(dot.bounds.center(), (15.0, -8.0));
        let halo = by_role(&rendering, Role::Outline)[0];
        assert_eq!(halo.bounds.center(), (15.0, -8.0));
        let (left, right) = horizontal_extent(&rendering);
        assert_eq!((left + right) / 2.0, 15.0);
    }

    #[test]
    fn test_outline_matches_style_and_sits_behind() {
        let cases = [
            (CrosshairStyle::Cross, Shape::Rect, 24.0),
            (CrosshairStyle::Square, Shape::Rect, 24.0),
            (CrosshairStyle::Circle, Shape::Ellipse, 24.0),
            (CrosshairStyle::Dot, Shape::Ellipse, 6.0),
        ];

        for (style, shape, extent) in cases {
            let mut settings = CrosshairSettings::default();
            settings.style = style;
            settings.modules.outline = true;
            settings.opacity = 0.1;

            let rendering = render(&settings);
            let halo = &rendering.commands[0];
            assert_eq!(halo.role, Role::Outline, "{style:?}");
            assert_eq!(halo.shape, shape, "{style:?}");
            assert_eq!(halo.bounds.width, extent, "{style:?}");
            assert_eq!(halo.opacity, 0.2);
            assert!(rendering.commands[1..].iter().all(|c| c.z > halo.z));
        }
    }

    #[test]
    fn test_effect_markers_follow_modules() {
        let mut settings = CrosshairSettings::default();
        assert!(!render(&settings).effects.any());

        settings.toggle_module(ModuleName::Pulsing);
        let effects = render(&settings).effects;
        assert!(effects.pulsing && !effects.dynamic_color);

        settings.toggle_module(ModuleName::DynamicColor);
        assert!(render(&settings).effects.dynamic_color);
    }

    #[test]
    fn test_zero_thickness_still_draws_one_pixel() {
        let mut settings = CrosshairSettings::default();
        settings.thickness = 0;

        let rendering = render(&settings);
        assert!(by_role(&rendering, Role::HorizontalBar).iter().all(|c| c.bounds.height == 1.0));
    }
}
