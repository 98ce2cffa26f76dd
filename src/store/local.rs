//! Local key-value storage
//!
//! A JSON object on disk mapping keys to values. The settings live under
//! [`STORAGE_KEY`]; other keys in the file are left untouched on write.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::SettingsStore;
use crate::config::CrosshairSettings;
use crate::constants::config::STORAGE_KEY;

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub const NAME: &'static str = "local";

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_entries(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage from {:?}", self.path))?;
        let entries = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage JSON from {:?}", self.path))?;
        Ok(Some(entries))
    }
}

impl SettingsStore for LocalStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn load(&self) -> Result<Option<Value>> {
        // A stored null counts as nothing stored
        Ok(self
            .read_entries()?
            .and_then(|mut entries| entries.remove(STORAGE_KEY))
            .filter(|raw| !raw.is_null()))
    }

    fn save(&self, settings: &CrosshairSettings) -> Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = ?e, "Storage file unreadable, starting fresh");
                Map::new()
            }
        };
        entries.insert(STORAGE_KEY.to_string(), settings.to_value());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create storage directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize storage to JSON")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write storage to {:?}", self.path))?;
        Ok(())
    }
}
