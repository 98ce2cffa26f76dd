//! Overlay daemon - transparent click-through window drawing the crosshair
//!
//! Settings reach the overlay two ways: configurators saving through the
//! IPC socket, and direct edits to the static config file, which is polled
//! for modification time changes.

mod config_watch;
mod ipc_handler;

use anyhow::{anyhow, Result};
use eframe::{egui, NativeOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::CrosshairSettings;
use crate::constants::timing;
use crate::effects::EffectFrame;
use crate::gui::painter;
use crate::ipc::OverlayServer;
use crate::render::{render, Rendering};
use crate::store::StaticConfigFile;

use config_watch::ConfigWatcher;
use ipc_handler::spawn_ipc_listener;

struct OverlayApp {
    shared: Arc<Mutex<CrosshairSettings>>,
    watcher: ConfigWatcher,
    settings: CrosshairSettings,
    rendering: Rendering,
    started: Instant,
}

impl OverlayApp {
    fn new(shared: Arc<Mutex<CrosshairSettings>>, watcher: ConfigWatcher) -> Self {
        let settings = shared.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let rendering = render(&settings);
        Self {
            shared,
            watcher,
            settings,
            rendering,
            started: Instant::now(),
        }
    }

    /// Pick up file edits and IPC saves, re-rendering only on change
    fn sync(&mut self) {
        if let Some(reloaded) = self.watcher.poll() {
            *self.shared.lock().unwrap_or_else(PoisonError::into_inner) = reloaded;
        }

        let current = self.shared.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if current != self.settings {
            self.rendering = render(&current);
            self.settings = current;
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let origin = ui.max_rect().center();
                let frame = EffectFrame::at(self.rendering.effects, self.started.elapsed().as_secs_f32());
                painter::paint(ui.painter(), origin, &self.rendering, frame);
            });

        let wait = if self.settings.is_animated() {
            timing::FRAME_MS
        } else {
            timing::CONFIG_POLL_MS
        };
        ctx.request_repaint_after(Duration::from_millis(wait));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// Run the overlay window, serving the host backend while it is open
pub fn run_overlay(config_path: PathBuf) -> Result<()> {
    let config = StaticConfigFile::new(config_path);
    let settings = match config.fetch() {
        Ok(Some(raw)) => CrosshairSettings::normalize(&raw),
        Ok(None) => {
            info!(path = %config.path().display(), "No config file, starting with defaults");
            CrosshairSettings::default()
        }
        Err(e) => {
            warn!(error = ?e, "Failed to read config file, starting with defaults");
            CrosshairSettings::default()
        }
    };
    let shared = Arc::new(Mutex::new(settings));

    // Without the socket the overlay still works from the config file
    let server = match OverlayServer::bind() {
        Ok(server) => Some(server),
        Err(e) => {
            warn!(error = ?e, "Failed to bind IPC socket, configurators will fall back to local storage");
            None
        }
    };

    let watcher = ConfigWatcher::new(config.clone());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Crosshair Overlay")
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_mouse_passthrough(true)
            .with_fullscreen(true),
        ..Default::default()
    };

    info!("Starting crosshair overlay");
    eframe::run_native(
        "Crosshair Overlay",
        options,
        Box::new(move |cc| {
            if let Some(server) = server {
                let ctx = cc.egui_ctx.clone();
                spawn_ipc_listener(server, Arc::clone(&shared), config, move || ctx.request_repaint());
            }
            Ok(Box::new(OverlayApp::new(shared, watcher)))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch overlay window: {err}"))
}
