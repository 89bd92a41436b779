//! Restaurants (v1)
//!
//! A server-rendered CRUD application for a list of restaurants, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::request ──▶ routing::router
//!                     (middleware)     (payload,         (method, path)
//!                                       _method)               │
//!                                                              ▼
//!                                                  restaurants::controller
//!                                                   (load_by_id, permit)
//!                                                              │
//!                                                              ▼
//!     Client Response                                   store::RestaurantStore
//!     ◀────────────── http::response ◀── views ◀──────  (memory | sqlite)
//!                     (page | redirect)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use restaurants::config::{load_config, validation::validate_config, AppConfig, ConfigError, StoreBackend};
use restaurants::lifecycle::{signals, Shutdown};
use restaurants::observability::logging;
use restaurants::{store, HttpServer};

#[derive(Parser)]
#[command(name = "restaurants")]
#[command(about = "Serve the restaurant listing application", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RESTAURANTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the database URL (implies the sqlite backend).
    #[arg(long)]
    database_url: Option<String>,

    /// Use the in-memory store instead of SQLite.
    #[arg(long, conflicts_with = "database_url")]
    memory: bool,
}

impl Cli {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.database_url {
            config.database.backend = StoreBackend::Sqlite;
            config.database.url = url.clone();
        }
        if self.memory {
            config.database.backend = StoreBackend::Memory;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability)?;

    tracing::info!("restaurants v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = ?config.database.backend,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = store::connect(&config.database).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listener();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, store).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
