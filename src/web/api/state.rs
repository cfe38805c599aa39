use axum::{
    extract::{Path, State},
    Json,
};

use crate::sim::{ExtrapolatedState, MarkerPosition};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites",
    responses(
        (status = 200, description = "Latest extrapolated set", body = Vec<ExtrapolatedState>)
    ),
    tag = "satellites"
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<ExtrapolatedState>> {
    let set = state.ticks.borrow().states.clone();
    Json(set.as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}",
    params(
        ("id" = String, Path, description = "Stable satellite identifier")
    ),
    responses(
        (status = 200, description = "Latest state for one satellite", body = ExtrapolatedState),
        (status = 404, description = "Unknown satellite", body = ErrorResponse)
    ),
    tag = "satellites"
)]
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ExtrapolatedState>> {
    let set = state.ticks.borrow().states.clone();
    set.iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("satellite_not_found"))
}

#[utoipa::path(
    get,
    path = "/api/markers",
    responses(
        (status = 200, description = "Latest rate-limited marker positions", body = Vec<MarkerPosition>)
    ),
    tag = "satellites"
)]
pub async fn list_markers(State(state): State<AppState>) -> Json<Vec<MarkerPosition>> {
    let markers = state.markers.borrow().clone();
    Json(markers.as_ref().clone())
}
