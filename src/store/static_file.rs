//! The overlay's `config.json`
//!
//! Read once at configurator startup as the last load fallback. The overlay
//! also writes it when the configurator saves through the host backend, and
//! watches it for hand edits.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::CrosshairSettings;

#[derive(Debug, Clone)]
pub struct StaticConfigFile {
    path: PathBuf,
}

impl StaticConfigFile {
    pub const NAME: &'static str = "config file";

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, or `None` if the file doesn't exist
    pub fn fetch(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;
        let raw = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", self.path))?;
        Ok(Some(raw))
    }

    pub fn write(&self, settings: &CrosshairSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(settings)
            .context("Failed to serialize settings to JSON")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;
        Ok(())
    }

    /// Last modification time, `None` when the file is missing
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrosshairStyle;

    fn temp_file(tag: &str) -> StaticConfigFile {
        StaticConfigFile::new(
            std::env::temp_dir().join(format!("crosshair-static-{tag}-{}.json", std::process::id())),
        )
    }

    #[test]
    fn test_missing_file_fetches_nothing() {
        let file = temp_file("missing");
        assert_eq!(file.fetch().unwrap(), None);
        assert_eq!(file.modified(), None);
    }

    #[test]
    fn test_write_then_fetch() {
        let file = temp_file("written");
        let mut settings = CrosshairSettings::default();
        settings.style = CrosshairStyle::Dot;

        file.write(&settings).unwrap();
        assert!(file.modified().is_some());
        let raw = file.fetch().unwrap().unwrap();
        assert_eq!(CrosshairSettings::normalize(&raw), settings);

        fs::remove_file(file.path()).unwrap();
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = temp_file("malformed");
        fs::write(file.path(), "style = cross").unwrap();
        assert!(file.fetch().is_err());
        fs::remove_file(file.path()).unwrap();
    }
}
