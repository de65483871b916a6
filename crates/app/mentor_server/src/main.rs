//! Mentor API server binary.
//!
//! Serves the chat relay and recommendation endpoints. Configuration comes
//! from the environment (a `.env` file is honoured) with CLI overrides.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mentor_api::config::{ApiConfig, Environment};
use mentor_core::catalog::Catalog;
use mentor_core::ranker::Ranker;
use mentor_core::relay::ChatRelay;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "mentor_server", about = "Mentor API server")]
struct Args {
    /// Address to bind, e.g. `127.0.0.1:5000`. Overrides `BIND_ADDR`/`PORT`.
    #[arg(long)]
    bind: Option<String>,

    /// Deployment environment (`development`, `production`, `test`).
    #[arg(long)]
    environment: Option<String>,

    /// JSON file holding the material catalog. Built-in entries otherwise.
    #[arg(long, env = "MENTOR_CATALOG")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,mentor_api=debug,mentor_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(environment) = args.environment.as_deref() {
        config.environment = Environment::parse(environment);
    }

    let catalog = match &args.catalog {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            Catalog::from_json_file(path)?
        }
        None => Catalog::builtin(),
    };
    info!(materials = catalog.len(), "catalog ready");

    let ranker = Ranker::new(Arc::new(catalog));
    let relay = ChatRelay::new(&config.gemini, ranker)?;

    if relay.is_configured() {
        info!(model = %config.gemini.model, "Gemini API configured");
    } else {
        warn!("GEMINI_API_KEY not set; chat endpoints will report a configuration error");
    }

    let bind_addr = config.bind_addr.clone();
    let environment = config.environment;
    let app = mentor_api::router(mentor_api::AppState::new(config, relay));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, ?environment, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
