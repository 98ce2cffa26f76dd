//! IPC message types for configurator ↔ overlay communication

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CrosshairSettings;

/// Requests sent from the configurator to the overlay
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum OverlayRequest {
    /// Fetch the overlay's live settings
    LoadConfig,

    /// Apply and persist new settings
    SaveConfig(CrosshairSettings),

    /// Health check
    Ping,
}

/// Responses sent from the overlay back to the configurator
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum OverlayResponse {
    /// Live settings, in persisted JSON form (response to LoadConfig)
    Config(Value),

    /// Settings applied and written (response to SaveConfig)
    Saved,

    /// Health check response
    Pong,

    /// Error occurred
    Error(String),
}
