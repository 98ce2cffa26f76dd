//! Toggle buttons for the optional crosshair modules

use eframe::egui;

use crate::config::{ModuleName, Modules};
use crate::gui::constants::ITEM_SPACING;

/// Renders one toggle per module and returns the module the user clicked
pub fn ui(ui: &mut egui::Ui, modules: &Modules) -> Option<ModuleName> {
    let mut clicked = None;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Modules").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal_wrapped(|ui| {
            for name in ModuleName::ALL {
                // The configurator owns the flip; the button only reports the click
                let mut active = modules.get(name);
                if ui.toggle_value(&mut active, name.label()).clicked() {
                    clicked = Some(name);
                }
            }
        });
    });

    clicked
}
