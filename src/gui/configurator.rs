//! Configurator window implemented with egui/eframe

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{info, warn};

use super::components::{crosshair_settings, module_toggles, preview};
use super::constants::*;
use crate::configurator::{Configurator, PersistWorker};
use crate::constants::timing;
use crate::store::StoreChain;

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

struct ConfiguratorApp {
    configurator: Configurator,
    started: Instant,
    status_message: Option<StatusMessage>,
}

impl ConfiguratorApp {
    fn new(_cc: &CreationContext<'_>, configurator: Configurator, source: &'static str) -> Self {
        info!(source, "Initializing egui configurator");

        Self {
            configurator,
            started: Instant::now(),
            status_message: Some(StatusMessage {
                text: format!("Loaded settings from {source}"),
                color: STATUS_INFO,
            }),
        }
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(PADDING);
                ui.heading("Crosshair Configurator");
                ui.add_space(SECTION_SPACING);

                let edits = crosshair_settings::ui(ui, self.configurator.settings());
                for (field, value) in edits {
                    match self.configurator.set(field, &value) {
                        Ok(()) => self.status_message = None,
                        Err(e) => {
                            warn!(%field, error = %e, "Rejected control value");
                            self.status_message = Some(StatusMessage {
                                text: format!("{e:#}"),
                                color: STATUS_ERROR,
                            });
                        }
                    }
                }

                ui.add_space(SECTION_SPACING);

                if let Some(name) = module_toggles::ui(ui, &self.configurator.settings().modules) {
                    self.configurator.toggle_module(name);
                    self.status_message = None;
                }

                ui.add_space(SECTION_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        self.configurator.apply();
                        self.status_message = Some(StatusMessage {
                            text: "Settings sent to store".to_string(),
                            color: STATUS_OK,
                        });
                    }
                    if ui.button("Reset").clicked() {
                        self.configurator.reset();
                        self.status_message = Some(StatusMessage {
                            text: "Settings reset to defaults".to_string(),
                            color: STATUS_INFO,
                        });
                    }
                });

                if let Some(message) = &self.status_message {
                    ui.colored_label(message.color, &message.text);
                }

                ui.add_space(SECTION_SPACING);

                let elapsed = self.started.elapsed().as_secs_f32();
                preview::ui(ui, &mut self.configurator, elapsed);
            });
        });

        if self.configurator.rendering().effects.any() {
            ctx.request_repaint_after(Duration::from_millis(timing::FRAME_MS));
        }
    }
}

/// Load settings through the store chain and run the configurator window
pub fn run_gui(static_config: PathBuf) -> Result<()> {
    let chain = StoreChain::standard(static_config);
    let loaded = chain.load();
    let worker = PersistWorker::spawn(chain)?;
    let configurator = Configurator::new(loaded.settings, Some(worker));
    let source = loaded.source;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Crosshair Configurator"),
        ..Default::default()
    };

    eframe::run_native(
        "Crosshair Configurator",
        options,
        Box::new(move |cc| Ok(Box::new(ConfiguratorApp::new(cc, configurator, source)))),
    )
    .map_err(|err| anyhow!("Failed to launch egui configurator: {err}"))
}
