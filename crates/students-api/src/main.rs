//! `students-api` — binary entry point.
//!
//! Startup sequence:
//! 1. Resolve the config path (`CONFIG_PATH` or `-config`) and load [`Config`].
//! 2. Initialise structured logging.
//! 3. Open the storage backend named by `storage_path`.
//! 4. Build the Axum router and bind the listener.
//! 5. Serve until SIGINT/SIGTERM, then drain for up to five seconds.

mod config;
mod server;
mod storage;
mod telemetry;
mod validation;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use config::{Args, Config};
use server::{serve, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let args = Args::parse_env();
    let cfg = Config::load(&args).map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.env, &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %cfg.env,
        "students-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Storage
    // -----------------------------------------------------------------------
    let storage = storage::open(&cfg)
        .await
        .with_context(|| format!("failed to open storage at {}", cfg.storage_path))?;
    info!(env = %cfg.env, storage_path = %cfg.storage_path, "storage initialized");

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(storage, cfg.env);
    let router = server::router::build(state);

    let listener = TcpListener::bind(&cfg.http_server.addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.http_server.addr))?;
    info!(addr = %cfg.http_server.addr, "server started");

    // -----------------------------------------------------------------------
    // 5. Serve until signalled
    // -----------------------------------------------------------------------
    serve::run(
        listener,
        router,
        serve::shutdown_signal(),
        serve::SHUTDOWN_TIMEOUT,
    )
    .await
}
