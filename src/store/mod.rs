//! Settings persistence
//!
//! A [`StoreChain`] tries its [`SettingsStore`] backends in priority order:
//! the running overlay (host backend) first, then the local key-value file.
//! Loading additionally falls back to the overlay's static config file, and
//! finally to the defaults. Every failure along the way is logged and treated
//! as "no data"; nothing here is fatal.

mod host;
mod local;
mod static_file;

pub use host::HostStore;
pub use local::LocalStore;
pub use static_file::StaticConfigFile;

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::CrosshairSettings;

/// Source name reported when nothing supplied settings
pub const DEFAULTS_SOURCE: &str = "defaults";

/// Error context marking a backend that turned out not to exist when used,
/// such as an overlay socket left behind by a dead process
#[derive(Debug, Clone, Copy)]
pub struct StoreUnavailable;

impl std::fmt::Display for StoreUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("store unavailable")
    }
}

/// A persistence backend for the settings object
pub trait SettingsStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the backend exists at all. Unavailable stores are skipped
    /// without logging a failure.
    fn is_available(&self) -> bool {
        true
    }

    /// Raw stored object, or `None` when the store holds nothing
    fn load(&self) -> Result<Option<Value>>;

    fn save(&self, settings: &CrosshairSettings) -> Result<()>;
}

/// Settings plus the backend they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub settings: CrosshairSettings,
    pub source: &'static str,
}

/// Prioritised list of stores with an optional read-only fallback file
pub struct StoreChain {
    stores: Vec<Box<dyn SettingsStore>>,
    fallback: Option<StaticConfigFile>,
}

impl StoreChain {
    pub fn new(stores: Vec<Box<dyn SettingsStore>>) -> Self {
        Self { stores, fallback: None }
    }

    pub fn with_fallback(mut self, fallback: StaticConfigFile) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Host backend, then local storage, then the static config file
    pub fn standard(static_config: PathBuf) -> Self {
        let mut stores: Vec<Box<dyn SettingsStore>> = Vec::new();
        match HostStore::from_default_socket() {
            Ok(host) => stores.push(Box::new(host)),
            Err(e) => warn!(error = %e, "Host backend socket path unavailable, skipping"),
        }
        stores.push(Box::new(LocalStore::new(crate::config::storage_path())));

        Self::new(stores).with_fallback(StaticConfigFile::new(static_config))
    }

    /// Load from the first backend that has data; never fails
    pub fn load(&self) -> Loaded {
        for store in &self.stores {
            if !store.is_available() {
                debug!(store = store.name(), "Store unavailable, trying next");
                continue;
            }

            match store.load() {
                Ok(Some(raw)) => {
                    info!(store = store.name(), "Loaded settings");
                    return Loaded {
                        settings: CrosshairSettings::normalize(&raw),
                        source: store.name(),
                    };
                }
                Ok(None) => debug!(store = store.name(), "Store has no settings, trying next"),
                Err(e) if e.is::<StoreUnavailable>() => {
                    debug!(store = store.name(), "Store unavailable, trying next")
                }
                Err(e) => warn!(store = store.name(), error = ?e, "Store load failed, trying next"),
            }
        }

        if let Some(fallback) = &self.fallback {
            match fallback.fetch() {
                Ok(Some(raw)) => {
                    info!(path = %fallback.path().display(), "Loaded settings from static config file");
                    return Loaded {
                        settings: CrosshairSettings::normalize(&raw),
                        source: StaticConfigFile::NAME,
                    };
                }
                Ok(None) => debug!(path = %fallback.path().display(), "Static config file not found"),
                Err(e) => warn!(error = ?e, "Failed to read static config file"),
            }
        }

        info!("No stored settings found, using defaults");
        Loaded {
            settings: CrosshairSettings::default(),
            source: DEFAULTS_SOURCE,
        }
    }

    /// Save to the first backend that accepts the write.
    ///
    /// Returns `false` when every backend failed; the caller keeps working
    /// with un-persisted settings.
    pub fn save(&self, settings: &CrosshairSettings) -> bool {
        for store in &self.stores {
            if !store.is_available() {
                debug!(store = store.name(), "Store unavailable, trying next");
                continue;
            }

            match store.save(settings) {
                Ok(()) => {
                    info!(store = store.name(), "Saved settings");
                    return true;
                }
                Err(e) if e.is::<StoreUnavailable>() => {
                    debug!(store = store.name(), "Store unavailable, trying next")
                }
                Err(e) => warn!(store = store.name(), error = ?e, "Store save failed, trying next"),
            }
        }

        warn!("Failed to persist settings to any store");
        false
    }
}
