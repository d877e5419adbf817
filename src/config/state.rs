// Application state module
// Read-only state shared by every connection task

use std::path::PathBuf;
use std::time::Duration;

use super::types::Config;
use crate::error::StartupError;
use crate::handler::music_proxy::passthrough;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical serving root; the process working directory is never changed
    pub serve_root: PathBuf,
    pub routes: RouteTable,
    /// Upstream client for the `target` passthrough
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build state from configuration and an already resolved serving root
    pub fn new(config: Config, serve_root: PathBuf) -> Result<Self, StartupError> {
        let timeout = Duration::from_secs(config.proxy.timeout_secs);
        let http_client = reqwest::Client::builder()
            .user_agent(config.proxy.user_agent.clone())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .redirect(passthrough::redirect_policy(&config.proxy))
            .build()?;

        Ok(Self {
            config,
            serve_root,
            routes: RouteTable::default(),
            http_client,
        })
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
