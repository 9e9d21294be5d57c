//! Hospital API server: reads config, opens the store, ensures the schema, serves until Ctrl-C.
//!
//! Run from repo root: `cargo run -p hospital-server`

use hospital_api::{app_router, ensure_database_exists, AppConfig, AppState, MemoryStore, PgStore, Store, StoreKind};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hospital_api=info,hospital_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store: Arc<dyn Store> = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pg = PgStore::connect(&config).await?;
            pg.ensure_schema().await?;
            Arc::new(pg)
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let app = app_router(AppState::new(store.clone()), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
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
