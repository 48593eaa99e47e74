//! http-blog server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ http::server ─▶ http::handlers             │
//!                            │                       │                      │
//!                            │                       ▼                      │
//!                            │                  api::client ──▶ transport ──┼──▶ Posts API
//!                            │                       │                      │
//!                            │                       ▼                      │
//!                            │                 api::normalize               │
//!                            │               (Envelope, status table)       │
//!                            │                       │                      │
//!     ◀──────────────────────┼── pages::render ◀─────┘                      │
//!                            │                                              │
//!                            │  config · observability · lifecycle          │
//!                            └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use http_blog::config::validation::validate_config;
use http_blog::config::{load_config, BlogConfig, ConfigError};
use http_blog::lifecycle::{signals, startup, Shutdown};
use http_blog::observability::logging;

#[derive(Parser)]
#[command(name = "http-blog")]
#[command(about = "Server-rendered blog backed by a REST posts API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `api.base_url`.
    #[arg(long)]
    api_base_url: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<BlogConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BlogConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(base_url) = &self.api_base_url {
            config.api.base_url = base_url.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability, config.environment);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        bind_address = %config.server.bind_address,
        api_base_url = %config.api.base_url,
        per_page = config.pagination.per_page,
        "http-blog starting"
    );

    let (server, listener) = startup::start(config).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
