use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::GeodirConfig;
use crate::query::{FilterEngine, LocationsPolicy};
use crate::storage::DatasetStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub default_radius_km: f64,
    pub locations_policy: LocationsPolicy,
}

impl AppState {
    pub fn new(store: Arc<DatasetStore>, config: &GeodirConfig) -> Self {
        Self {
            store,
            default_radius_km: config.radius_km(),
            locations_policy: config.locations_policy(),
        }
    }

    /// Engine borrowing the shared store for one request
    pub fn engine(&self) -> FilterEngine<'_> {
        FilterEngine::new(&self.store)
            .with_default_radius(self.default_radius_km)
            .with_locations_policy(self.locations_policy)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/api/healthcheck", get(routes::healthcheck))
        .route("/api/companies", get(routes::list_companies))
        .route("/api/companies/{company_id}", get(routes::get_company))
        .route("/api/companies/{company_id}/locations", get(routes::get_locations))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

pub async fn start_server(config: &GeodirConfig, store: Arc<DatasetStore>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(store, config));
    let app = router(state);

    let addr = config.bind_addr()?;
    tracing::info!("Starting server on {}", addr);
    crate::ui::serving(&format!("http://{}", addr));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
