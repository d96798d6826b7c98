use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use workshop_booking::modules::appointments::adapters::outbound::catalog_in_memory::InMemoryModificationCatalog;
use workshop_booking::modules::appointments::adapters::outbound::employee_directory_in_memory::InMemoryEmployeeDirectory;
use workshop_booking::modules::appointments::core::estimates::ModificationItem;
use workshop_booking::shared::core::primitives::SystemClock;
use workshop_booking::shell::config::Config;
use workshop_booking::shell::http::router;
use workshop_booking::shell::state::{AppState, InMemoryAdapters};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let config = Config::from_env()?;

    // In-memory deps for now
    let catalog = InMemoryModificationCatalog::with_items([
        ModificationItem {
            id: "wheels".into(),
            name: "Alloy wheels".into(),
            estimated_hours: 2.0,
            unit_price: 60000,
        },
        ModificationItem {
            id: "tint".into(),
            name: "Window tint".into(),
            estimated_hours: 3.0,
            unit_price: 25000,
        },
    ]);
    let directory = InMemoryEmployeeDirectory::with_employees(["E1", "E2", "E3"]);
    let adapters = InMemoryAdapters::new(catalog, directory);
    let state = AppState::in_memory(&config, Arc::new(SystemClock), &adapters);

    let app = router(state);
    tracing::info!("HTTP API: http://{}", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
