//! Host backend: the running overlay, reached over its Unix socket

use anyhow::{bail, Result};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{SettingsStore, StoreUnavailable};
use crate::config::CrosshairSettings;
use crate::ipc::{self, OverlayClient, OverlayRequest, OverlayResponse};

pub struct HostStore {
    socket_path: PathBuf,
}

impl HostStore {
    pub const NAME: &'static str = "overlay";

    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    pub fn from_default_socket() -> Result<Self> {
        Ok(Self::new(ipc::default_socket_path()?))
    }

    fn request(&self, req: &OverlayRequest) -> Result<OverlayResponse> {
        let mut client = match OverlayClient::connect_to(&self.socket_path) {
            Ok(client) => client,
            Err(e) if overlay_gone(&e) => return Err(e.context(StoreUnavailable)),
            Err(e) => return Err(e),
        };
        client.request(req)
    }
}

/// Nobody listening: the socket was removed or its overlay has exited
fn overlay_gone(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| matches!(io.kind(), ErrorKind::ConnectionRefused | ErrorKind::NotFound))
}

impl SettingsStore for HostStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// No socket file means no overlay is running
    fn is_available(&self) -> bool {
        self.socket_path.exists()
    }

    fn load(&self) -> Result<Option<Value>> {
        match self.request(&OverlayRequest::LoadConfig)? {
            OverlayResponse::Config(Value::Null) => Ok(None),
            OverlayResponse::Config(raw) => Ok(Some(raw)),
            OverlayResponse::Error(msg) => bail!("overlay refused load: {msg}"),
            other => bail!("unexpected overlay response to load: {other:?}"),
        }
    }

    fn save(&self, settings: &CrosshairSettings) -> Result<()> {
        match self.request(&OverlayRequest::SaveConfig(settings.clone()))? {
            OverlayResponse::Saved => Ok(()),
            OverlayResponse::Error(msg) => bail!("overlay refused save: {msg}"),
            other => bail!("unexpected overlay response to save: {other:?}"),
        }
    }
}
