use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cors_devserver::config::{self, AppState, Config, ConfigOverrides};
use cors_devserver::{logger, server};

/// Static file server with CORS headers and a mock music API
#[derive(Parser, Debug)]
#[command(name = "cors-devserver", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve
    #[arg(short, long)]
    dir: Option<String>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Configuration file, without extension
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        host: cli.host,
        port: cli.port,
        root: cli.dir,
    };
    let cfg = Config::load_from(&cli.config, &overrides)?;
    logger::init(&cfg)?;

    let serve_root = config::resolve_serve_root(&cfg.serve.root);

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, serve_root))
}

async fn async_main(cfg: Config, serve_root: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    let bound = listener.local_addr()?;

    logger::log_server_start(&bound, &serve_root, &cfg);

    let state = Arc::new(AppState::new(cfg, serve_root)?);
    server::run(listener, state).await?;
    Ok(())
}
