//! Configurator controller
//!
//! Holds the one live settings instance and its current rendering. Every
//! mutation runs mutate → render → persist in the same call; persistence is
//! handed to a background worker so the UI never waits on a store.

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::{CrosshairSettings, Field, ModuleName};
use crate::render::{render, Rendering};
use crate::store::StoreChain;

/// Background thread saving settings through a [`StoreChain`]
pub struct PersistWorker {
    tx: Option<Sender<CrosshairSettings>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWorker {
    pub fn spawn(chain: StoreChain) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("persist".to_string())
            .spawn(move || run_persist_loop(&chain, &rx))
            .context("Failed to spawn persist worker thread")?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a save; returns immediately
    pub fn submit(&self, settings: CrosshairSettings) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(settings).is_err() {
            warn!("Persist worker has stopped, settings not saved");
        }
    }
}

impl Drop for PersistWorker {
    /// Closes the queue and waits for pending saves to finish
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Persist worker panicked");
            }
        }
    }
}

fn run_persist_loop(chain: &StoreChain, rx: &Receiver<CrosshairSettings>) {
    debug!("Persist worker started");

    while let Ok(mut settings) = rx.recv() {
        // Only the newest queued edit matters
        let mut skipped = 0usize;
        while let Ok(newer) = rx.try_recv() {
            settings = newer;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "Coalesced queued saves");
        }

        if chain.save(&settings) {
            debug!("Apply done");
        } else {
            warn!("Apply failed to persist config");
        }
    }

    debug!("Persist worker stopped");
}

/// Offset of a pointer from the preview centre, rounded to whole pixels
pub fn pointer_offset(pointer: (f32, f32), center: (f32, f32)) -> (i32, i32) {
    (
        (pointer.0 - center.0).round() as i32,
        (pointer.1 - center.1).round() as i32,
    )
}

pub struct Configurator {
    settings: CrosshairSettings,
    rendering: Rendering,
    pointer: (i32, i32),
    persist: Option<PersistWorker>,
}

impl Configurator {
    pub fn new(settings: CrosshairSettings, persist: Option<PersistWorker>) -> Self {
        let rendering = render(&settings);
        Self {
            settings,
            rendering,
            pointer: (0, 0),
            persist,
        }
    }

    pub fn settings(&self) -> &CrosshairSettings {
        &self.settings
    }

    pub fn rendering(&self) -> &Rendering {
        &self.rendering
    }

    /// Pointer offset from the preview centre, `(0, 0)` when outside
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Apply one control edit; a value equal to the current one is not persisted
    pub fn set(&mut self, field: Field, value: &Value) -> Result<()> {
        let mut updated = self.settings.clone();
        updated.set(field, value)?;
        if updated != self.settings {
            self.settings = updated;
            self.commit();
        }
        Ok(())
    }

    pub fn toggle_module(&mut self, name: ModuleName) -> bool {
        let enabled = self.settings.toggle_module(name);
        info!(module = %name, enabled, "Toggled module");
        self.commit();
        enabled
    }

    pub fn reset(&mut self) {
        info!("Resetting crosshair to defaults");
        self.settings.reset();
        self.commit();
    }

    /// Persist the current settings again without changing them
    pub fn apply(&mut self) {
        self.persist_current();
    }

    pub fn pointer_moved(&mut self, pointer: (f32, f32), center: (f32, f32)) {
        self.pointer = pointer_offset(pointer, center);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = (0, 0);
    }

    fn commit(&mut self) {
        self.rendering = render(&self.settings);
        self.persist_current();
    }

    fn persist_current(&self) {
        if let Some(worker) = &self.persist {
            worker.submit(self.settings.clone());
        }
    }
}
