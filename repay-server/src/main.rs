use repay_server::catalog::OperatorCatalog;
use repay_server::config::ServerConfig;
use repay_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repay_server=info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Load the operator catalog (fail fast if unavailable)
    let catalog = OperatorCatalog::load(&config.catalog_path).expect("Failed to load operator catalog");

    // Build app state and router
    let state = AppState::new(catalog);
    let app = create_router(state);

    let addr = config.addr;
    info!(%addr, "Delay repay calculator listening");
    info!("GET  /health           - Health check");
    info!("GET  /operators        - List operators and schedules");
    info!("POST /repay/calculate  - Calculate compensation");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
