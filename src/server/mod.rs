// Server module entry point
// Accept loop, per-connection serving and listener setup

pub mod connection;
pub mod listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::error::StartupError;
use crate::logger;

pub use connection::spawn_connection;
pub use listener::create_listener;

/// Accept connections until Ctrl+C
///
/// In-flight connections are not awaited; they end with the runtime.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> Result<(), StartupError> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
