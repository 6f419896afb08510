// HTTP request handlers
use crate::application::dashboard_controller::{ControllerState, PairOutcome, RefreshReport};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct StreamQuery {
    pub refresh: Option<bool>,
}

#[derive(Deserialize)]
pub struct RefreshQuery {
    /// Answer only once every fetch of the refresh has settled.
    pub wait: Option<bool>,
}

#[derive(Serialize)]
pub struct StateBody {
    pub state: ControllerState,
    pub last_refresh: Option<RefreshSummary>,
}

#[derive(Serialize)]
pub struct RefreshAccepted {
    pub refresh_id: u64,
    pub state: ControllerState,
}

#[derive(Serialize)]
pub struct FetchSummary {
    pub fetch: &'static str,
    pub rendered: usize,
    pub missing: usize,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshSummary {
    pub refresh_id: u64,
    pub elapsed_ms: u64,
    pub failures: usize,
    pub fetches: Vec<FetchSummary>,
}

impl From<&RefreshReport> for RefreshSummary {
    fn from(report: &RefreshReport) -> Self {
        let fetches = report
            .outcomes
            .iter()
            .map(|(kind, outcome)| match outcome {
                PairOutcome::Rendered { rendered, missing } => FetchSummary {
                    fetch: kind.as_str(),
                    rendered: *rendered,
                    missing: *missing,
                    error: None,
                },
                PairOutcome::Failed(e) => FetchSummary {
                    fetch: kind.as_str(),
                    rendered: 0,
                    missing: 0,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        Self {
            refresh_id: report.refresh_id,
            elapsed_ms: report.elapsed.as_millis() as u64,
            failures: report.failures(),
            fetches,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// All mounted surfaces with their current rendering
pub async fn list_surfaces(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let surfaces = state.surfaces.snapshot();
    match json_response(&surfaces, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// One surface, 404 when it is not mounted
pub async fn get_surface(
    Path(key): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(surface) = state.surfaces.get(&key) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match json_response(&surface, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Idle/Loading plus the outcome of the last settled refresh
pub async fn controller_state(State(state): State<Arc<AppState>>) -> Json<StateBody> {
    Json(StateBody {
        state: state.controller.state(),
        last_refresh: state.controller.last_report().as_ref().map(RefreshSummary::from),
    })
}

/// Manual refresh. Renders land asynchronously unless `?wait=true`.
pub async fn refresh_dashboard(
    Query(query): Query<RefreshQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let handle = state.controller.refresh();
    if !query.wait.unwrap_or(false) {
        let body = RefreshAccepted {
            refresh_id: handle.id(),
            state: state.controller.state(),
        };
        return (StatusCode::ACCEPTED, Json(body)).into_response();
    }

    let refresh_id = handle.id();
    match handle.settled().await {
        Ok(report) => Json(RefreshSummary::from(&report)).into_response(),
        Err(e) => {
            tracing::error!(refresh_id, error = %e, "Refresh settlement task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Stream render events as they happen, optionally kicking off a refresh
pub async fn stream_renders(
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Subscribe before refreshing so no render is missed
    let rx = state.surfaces.subscribe();
    if query.refresh.unwrap_or(false) {
        let handle = state.controller.refresh();
        tracing::debug!(refresh_id = handle.id(), "Refresh requested by stream client");
    }
    stream_from_receiver(rx, accepts_brotli(&headers))
}
