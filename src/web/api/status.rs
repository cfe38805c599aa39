use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::sim::SimulatorStatus;
use crate::web::server::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub triggered: bool,
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Scheduler mode and tick statistics", body = SimulatorStatus)
    ),
    tag = "status"
)]
pub async fn get_status(State(state): State<AppState>) -> Json<SimulatorStatus> {
    let simulator = state.simulator.lock().await;
    Json(simulator.status())
}

#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 202, description = "Upstream refresh triggered", body = RefreshResponse)
    ),
    tag = "status"
)]
pub async fn trigger_refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<RefreshResponse>) {
    state.refresh.notify_one();
    (StatusCode::ACCEPTED, Json(RefreshResponse { triggered: true }))
}
