use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::analysis::{analysis_routes, AnalysisState};
use super::health::{health_check, root};
use crate::config::AppConfig;

pub fn create_routes(config: &AppConfig) -> Router {
    let api_v1 = Router::new().nest(
        "/analysis",
        analysis_routes(AnalysisState::new(config.max_history_frames)),
    );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .layer(DefaultBodyLimit::max(config.max_payload_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
