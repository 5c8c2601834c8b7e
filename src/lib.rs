pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod domain;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;
pub(crate) mod store;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::store::memory::MemoryStore;
use crate::store::RecordStore;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let state = AppState::new(settings, store);

    if let Err(err) = core::bootstrap::seed_demo_data(&state).await {
        tracing::error!(error = %err, "Failed to seed demo dataset");
    }

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Nexel API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    Ok(())
}
