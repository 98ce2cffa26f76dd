//! Live preview area with pointer coordinate readout

use eframe::egui;

use crate::configurator::Configurator;
use crate::effects::EffectFrame;
use crate::gui::constants::{ITEM_SPACING, PREVIEW_BACKGROUND, PREVIEW_GUIDE, PREVIEW_HEIGHT};
use crate::gui::painter;

pub fn ui(ui: &mut egui::Ui, configurator: &mut Configurator, elapsed_secs: f32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new("Preview").strong());
        ui.add_space(ITEM_SPACING);

        let size = egui::vec2(ui.available_width(), PREVIEW_HEIGHT);
        let (response, surface) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;
        let center = rect.center();

        surface.rect_filled(rect, egui::CornerRadius::same(4), PREVIEW_BACKGROUND);
        let guide = egui::Stroke::new(1.0, PREVIEW_GUIDE);
        surface.hline(rect.x_range(), center.y, guide);
        surface.vline(center.x, rect.y_range(), guide);

        let clipped = surface.with_clip_rect(rect);
        let frame = EffectFrame::at(configurator.rendering().effects, elapsed_secs);
        painter::paint(&clipped, center, configurator.rendering(), frame);

        match response.hover_pos() {
            Some(pos) => configurator.pointer_moved((pos.x, pos.y), (center.x, center.y)),
            None => configurator.pointer_left(),
        }

        let (x, y) = configurator.pointer();
        ui.horizontal(|ui| {
            ui.label("Pointer:");
            ui.monospace(format!("X: {x:>4}  Y: {y:>4}"));
        });
    });
}
