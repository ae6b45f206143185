use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod http;
mod metrics;
mod storage;

use config::{Settings, StoreBackend};
use domain::customer::CustomerService;
use storage::{CustomerStore, InMemoryCustomerStore, PostgresCustomerStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_service=debug")),
        )
        .init();

    let settings = Settings::from_env();
    tracing::info!(backend = settings.backend.as_str(), "starting customer service");

    // === 1. Build the storage port implementation chosen at startup ===
    let store: Arc<dyn CustomerStore> = match settings.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory customer store");
            Arc::new(InMemoryCustomerStore::new())
        }
        StoreBackend::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?;
            tracing::info!("connecting to Postgres");
            Arc::new(PostgresCustomerStore::connect(database_url).await?)
        }
    };

    // === 2. Wire the service and metrics ===
    let service = web::Data::new(CustomerService::new(store));
    let metrics = web::Data::new(metrics::Metrics::new()?);

    // === 3. Serve ===
    let bind = (settings.http_host.clone(), settings.http_port);
    tracing::info!(
        "listening on http://{}:{}/api/v1/customers",
        settings.http_host,
        settings.http_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(metrics.clone())
            .configure(http::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
