//! Payroll engine HTTP server.
//!
//! Reads the configuration named by `PAYROLL_ENGINE_CONFIG` (defaults apply
//! when unset), seeds an in-memory store and serves the API.

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::payroll::PayrollService;
use payroll_engine::store::{InMemoryStore, PayrollStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let loader = ConfigLoader::from_env()?;
    let config = loader.config().clone();

    let store = match loader.load_seed()? {
        Some(seed) => {
            info!(
                employees = seed.employees.len(),
                attendance = seed.attendance.len(),
                "Loaded seed data"
            );
            InMemoryStore::from_seed(seed)
        }
        None => InMemoryStore::new(),
    };
    let store: Arc<dyn PayrollStore> = Arc::new(store);

    let service = PayrollService::with_settings(store, config.recalculation.clone());
    let router = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!(address = %config.server.bind_address, "Payroll engine listening");
    axum::serve(listener, router).await?;
    Ok(())
}
