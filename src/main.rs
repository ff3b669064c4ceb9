//! Products API server. `--clear` wipes all product data and exits instead of serving.

use clap::Parser;
use products_api::{app, check_connection, AppState, Config, PgProductStore};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "products-api", version, about = "REST API for product records")]
struct Cli {
    /// Drop all product data, recreate the table, and exit
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if cli.clear {
        return clear_data(&config).await;
    }

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn clear_data(config: &Config) -> ExitCode {
    let store = match PgProductStore::connect_lazy(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot open database");
            return ExitCode::FAILURE;
        }
    };
    let result = store.reset().await;
    store.close().await;
    match result {
        Ok(()) => {
            tracing::info!("Datos eliminados correctamente");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to clear data");
            ExitCode::FAILURE
        }
    }
}

/// Ping the database and create the products table if needed.
async fn connect_db(store: &PgProductStore) -> Result<(), products_api::StoreError> {
    check_connection(store).await?;
    store.ensure_schema().await
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = PgProductStore::connect_lazy(&config)?;
    if let Err(e) = connect_db(&store).await {
        if config.is_production() {
            return Err(e.into());
        }
        tracing::warn!("database unavailable; serving in degraded mode");
    }

    let state = AppState::new(Arc::new(store.clone()));
    let router = app(state, config.frontend_url.as_deref());

    let listener = TcpListener::bind(config.listen_addr()?).await?;
    tracing::info!("Rest API en el puerto {}", listener.local_addr()?.port());
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
