//! Scripted access to the stored settings

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

use crate::config::{CrosshairSettings, Field, ModuleName};
use crate::render::render;
use crate::store::StoreChain;

/// Print the loaded settings and where they came from
pub fn show(static_config: PathBuf) -> Result<()> {
    let loaded = StoreChain::standard(static_config).load();
    print_json(&json!({
        "source": loaded.source,
        "settings": loaded.settings,
    }))
}

pub fn set(static_config: PathBuf, field: Field, raw: &str) -> Result<()> {
    let value = parse_cli_value(raw);
    update(static_config, |settings| {
        settings
            .set(field, &value)
            .with_context(|| format!("Invalid value {raw:?} for {field}"))
    })
}

pub fn toggle(static_config: PathBuf, name: ModuleName) -> Result<()> {
    update(static_config, |settings| {
        let enabled = settings.toggle_module(name);
        info!(module = %name, enabled, "Toggled module");
        Ok(())
    })
}

pub fn reset(static_config: PathBuf) -> Result<()> {
    update(static_config, |settings| {
        settings.reset();
        Ok(())
    })
}

/// Print the draw commands for the loaded settings
pub fn render_loaded(static_config: PathBuf) -> Result<()> {
    let loaded = StoreChain::standard(static_config).load();
    print_json(&render(&loaded.settings))
}

/// Load, mutate, save, print
fn update(static_config: PathBuf, mutate: impl FnOnce(&mut CrosshairSettings) -> Result<()>) -> Result<()> {
    let chain = StoreChain::standard(static_config);
    let mut settings = chain.load().settings;
    mutate(&mut settings)?;
    let settings = CrosshairSettings::normalize(&settings.to_value());

    if !chain.save(&settings) {
        bail!("No settings store accepted the write");
    }
    print_json(&settings)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Command-line values are JSON when they parse as JSON, plain strings otherwise,
/// so `size 30`, `outline true` and `color #ff0000` all work unquoted
pub(crate) fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
