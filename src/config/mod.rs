// Configuration module entry point
// Layered configuration: defaults, optional TOML file, environment, command line

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::StartupError;
use crate::logger;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ProxyConfig, ServeConfig, ServerConfig};

/// Default configuration file, looked up without extension
pub const DEFAULT_CONFIG_FILE: &str = "devserver";

/// Identifying User-Agent sent by the passthrough
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Values supplied on the command line, applied over every other source
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<String>,
}

impl Config {
    /// Load configuration from the given file path (without extension)
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(
        config_path: &str,
        overrides: &ConfigOverrides,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8787)?
            .set_default("server.keep_alive", true)?
            .set_default("serve.root", ".")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("proxy.enabled", true)?
            .set_default("proxy.timeout_secs", 15)?
            .set_default("proxy.chunk_size", 8192)?
            .set_default("proxy.user_agent", DEFAULT_USER_AGENT)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DEVSERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("serve.root", overrides.root.clone())?
            .build()?;

        settings.try_deserialize()
    }

    /// Load with built-in defaults and environment only
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE, &ConfigOverrides::default())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| StartupError::Address(format!("{addr} ({e})")))
    }
}

/// Resolve the serving root to an absolute directory
///
/// Falls back to the current working directory, with a warning, when the
/// requested path is not a directory.
pub fn resolve_serve_root(requested: &str) -> PathBuf {
    let path = Path::new(requested);
    if path.is_dir() {
        if let Ok(canonical) = path.canonicalize() {
            return canonical;
        }
    }

    logger::log_warning(&format!(
        "Directory '{requested}' not found. Serving current working directory instead."
    ));
    std::env::current_dir()
        .and_then(|cwd| cwd.canonicalize())
        .unwrap_or_else(|_| PathBuf::from("."))
}
