// Route table for the dashboard host view
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    controller_state, get_surface, health_check, list_surfaces, refresh_dashboard, stream_renders,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Compression is handled per response, so no CompressionLayer here
    Router::new()
        .route("/healthz", get(health_check))
        .route("/surfaces", get(list_surfaces))
        .route("/surfaces/:key", get(get_surface))
        .route("/state", get(controller_state))
        .route("/refresh", post(refresh_dashboard))
        .route("/stream", get(stream_renders))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
