//! Host backend served by the overlay process

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::os::unix::net::UnixStream;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::CrosshairSettings;
use crate::constants::ipc::SERVER_READ_TIMEOUT_MS;
use crate::ipc::{read_message, write_message, OverlayRequest, OverlayResponse, OverlayServer};
use crate::store::StaticConfigFile;

/// Spawn IPC listener thread answering configurator requests.
///
/// `on_change` runs after every accepted save so the window can repaint.
pub fn spawn_ipc_listener(
    server: OverlayServer,
    state: Arc<Mutex<CrosshairSettings>>,
    config: StaticConfigFile,
    on_change: impl Fn() + Send + 'static,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_ipc_loop(&server, &state, &config, &on_change) {
            error!(error = ?e, "IPC listener thread crashed");
        }
    })
}

fn run_ipc_loop(
    server: &OverlayServer,
    state: &Arc<Mutex<CrosshairSettings>>,
    config: &StaticConfigFile,
    on_change: &dyn Fn(),
) -> Result<()> {
    info!(socket = ?server.path(), "IPC listener started");

    loop {
        // Accept connection (blocks until a configurator connects)
        let mut stream = server.accept().context("Failed to accept IPC connection")?;
        debug!("Configurator connected to overlay");

        // A client that never sends must not hold up the next one
        stream
            .set_read_timeout(Some(Duration::from_millis(SERVER_READ_TIMEOUT_MS)))
            .context("Failed to set read timeout on IPC connection")?;

        if let Err(e) = serve_client(&mut stream, state, config, on_change) {
            warn!(error = ?e, "IPC connection closed or error");
        }
    }
}

fn serve_client(
    stream: &mut UnixStream,
    state: &Mutex<CrosshairSettings>,
    config: &StaticConfigFile,
    on_change: &dyn Fn(),
) -> Result<()> {
    loop {
        let request: OverlayRequest = match read_message(stream) {
            Ok(request) => request,
            // Clients connect per request and hang up afterwards
            Err(e) if is_hang_up(&e) => {
                debug!("Configurator disconnected");
                return Ok(());
            }
            Err(e) => return Err(e.context("Bad request from configurator")),
        };

        let saved = matches!(request, OverlayRequest::SaveConfig(_));
        let response = handle_request(request, state, config);
        if saved && matches!(response, OverlayResponse::Saved) {
            on_change();
        }
        write_message(stream, &response)?;
    }
}

/// Clean end of a connection: EOF between messages, or an idle client timing out
fn is_hang_up(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>().is_some_and(|io| {
        matches!(io.kind(), ErrorKind::UnexpectedEof | ErrorKind::WouldBlock | ErrorKind::TimedOut)
    })
}

/// Apply one request against the live settings
pub(crate) fn handle_request(
    request: OverlayRequest,
    state: &Mutex<CrosshairSettings>,
    config: &StaticConfigFile,
) -> OverlayResponse {
    match request {
        OverlayRequest::LoadConfig => {
            let settings = state.lock().unwrap_or_else(PoisonError::into_inner);
            OverlayResponse::Config(settings.to_value())
        }

        OverlayRequest::SaveConfig(settings) => {
            // Typed on the wire, but ranges still need clamping
            let settings = CrosshairSettings::normalize(&settings.to_value());
            *state.lock().unwrap_or_else(PoisonError::into_inner) = settings.clone();
            info!("Received crosshair settings via IPC");

            match config.write(&settings) {
                Ok(()) => OverlayResponse::Saved,
                Err(e) => {
                    error!(error = ?e, "Failed to write config file");
                    OverlayResponse::Error(format!("{e:#}"))
                }
            }
        }

        OverlayRequest::Ping => OverlayResponse::Pong,
    }
}
