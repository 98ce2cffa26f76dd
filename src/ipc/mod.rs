//! IPC (Inter-Process Communication) via Unix sockets
//!
//! The running overlay is the configurator's host backend. Messages are
//! length-prefixed JSON over a Unix domain socket.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod messages;
pub use messages::{OverlayRequest, OverlayResponse};

use crate::constants::ipc::{CLIENT_TIMEOUT_MS, MAX_MESSAGE_SIZE, SOCKET_PATH};

/// Get default socket path (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_socket_path() -> Result<PathBuf> {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(runtime_dir).join(SOCKET_PATH));
    }

    let cache = dirs::cache_dir()
        .context("Failed to determine cache directory (no XDG_RUNTIME_DIR or HOME)")?;
    Ok(cache.join(SOCKET_PATH))
}

/// Client connection to the overlay (used by the configurator)
pub struct OverlayClient {
    pub(crate) stream: UnixStream,
}

impl OverlayClient {
    /// Connect to specific socket path
    pub fn connect_to(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .with_context(|| format!("Failed to connect to overlay at {}", path.display()))?;

        // A wedged overlay must not stall the persist worker forever
        let timeout = Some(Duration::from_millis(CLIENT_TIMEOUT_MS));
        stream.set_read_timeout(timeout).context("Failed to set read timeout")?;
        stream.set_write_timeout(timeout).context("Failed to set write timeout")?;

        Ok(Self { stream })
    }

    /// Send request and wait for response
    pub fn request(&mut self, req: &OverlayRequest) -> Result<OverlayResponse> {
        write_message(&mut self.stream, req)?;
        read_message(&mut self.stream)
    }
}

/// Server listener for the overlay process
pub struct OverlayServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl OverlayServer {
    /// Create server and bind to default socket path
    pub fn bind() -> Result<Self> {
        let socket_path = default_socket_path()?;
        Self::bind_to(socket_path)
    }

    /// Create server and bind to specific socket path
    pub fn bind_to(socket_path: PathBuf) -> Result<Self> {
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {}", parent.display()))?;
        }

        // Remove stale socket if exists
        if socket_path.exists() {
            std::fs::remove_file(&socket_path)
                .with_context(|| format!("Failed to remove stale socket: {}", socket_path.display()))?;
        }

        let listener = UnixListener::bind(&socket_path)
            .with_context(|| format!("Failed to bind socket at {}", socket_path.display()))?;

        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&socket_path, std::fs::Permissions::from_mode(0o700))
                .context("Failed to set socket permissions")?;
        }

        Ok(Self {
            listener,
            socket_path,
        })
    }

    /// Accept incoming connection (blocking)
    pub fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self.listener.accept()
            .context("Failed to accept IPC connection")?;
        Ok(stream)
    }

    pub fn path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for OverlayServer {
    fn drop(&mut self) {
        // Clean up socket file
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Write length-prefixed message to stream
pub(crate) fn write_message<T: Serialize, W: Write>(stream: &mut W, msg: &T) -> Result<()> {
    let json = serde_json::to_vec(msg).context("Failed to serialize message to JSON")?;

    if json.len() > MAX_MESSAGE_SIZE {
        return Err(anyhow!("Message too large: {} bytes (max: {})", json.len(), MAX_MESSAGE_SIZE));
    }

    // u32 little-endian length prefix
    let len = json.len() as u32;
    stream
        .write_all(&len.to_le_bytes())
        .context("Failed to write message length")?;
    stream
        .write_all(&json)
        .context("Failed to write message payload")?;
    stream.flush().context("Failed to flush stream")?;

    Ok(())
}

/// Read length-prefixed message from stream
pub(crate) fn read_message<T: for<'de> Deserialize<'de>, R: Read>(stream: &mut R) -> Result<T> {
    let mut len_buf = [0u8; 4];
    stream
        .read_exact(&mut len_buf)
        .context("Failed to read message length")?;
    let len = u32::from_le_bytes(len_buf) as usize;

    // Reject before allocating
    if len > MAX_MESSAGE_SIZE {
        return Err(anyhow!("Message too large: {} bytes (max: {})", len, MAX_MESSAGE_SIZE));
    }

    let mut json_buf = vec![0u8; len];
    stream
        .read_exact(&mut json_buf)
        .context("Failed to read message payload")?;

    serde_json::from_slice(&json_buf).context("Failed to deserialize message from JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrosshairSettings;
    use std::io::Cursor;

    #[test]
    fn test_request_survives_socket_pair() {
        let (mut left, mut right) = UnixStream::pair().unwrap();
        let mut settings = CrosshairSettings::default();
        settings.size = 64;

        write_message(&mut left, &OverlayRequest::SaveConfig(settings.clone())).unwrap();
        match read_message::<OverlayRequest, _>(&mut right).unwrap() {
            OverlayRequest::SaveConfig(received) => assert_eq!(received, settings),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_oversize_length_prefix_rejected() {
        let len = (MAX_MESSAGE_SIZE as u32 + 1).to_le_bytes();
        let mut reader = Cursor::new(len.to_vec());
        let err = read_message::<OverlayResponse, _>(&mut reader).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_truncated_payload_is_error() {
        let mut bytes = 10u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(b"{\"Po");
        let mut reader = Cursor::new(bytes);
        assert!(read_message::<OverlayResponse, _>(&mut reader).is_err());
    }

    #[test]
    fn test_client_round_trip_against_server() {
        let path = std::env::temp_dir().join(format!("crosshair-ipc-test-{}.sock", std::process::id()));
        let server = OverlayServer::bind_to(path.clone()).unwrap();

        let handle = std::thread::spawn(move || {
            let mut stream = server.accept().unwrap();
            let request: OverlayRequest = read_message(&mut stream).unwrap();
            assert!(matches!(request, OverlayRequest::Ping));
            write_message(&mut stream, &OverlayResponse::Pong).unwrap();
        });

        let mut client = OverlayClient::connect_to(&path).unwrap();
        let response = client.request(&OverlayRequest::Ping).unwrap();
        assert!(matches!(response, OverlayResponse::Pong));
        handle.join().unwrap();
    }
}
