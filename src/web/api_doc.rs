use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::status::RefreshResponse;
use crate::sim::{ExtrapolatedState, MarkerPosition, SimulatorMode, SimulatorStatus, TickStats};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::state::list_satellites,
        super::api::state::get_satellite,
        super::api::state::list_markers,
        super::api::status::get_status,
        super::api::status::trigger_refresh,
    ),
    components(
        schemas(
            ExtrapolatedState,
            MarkerPosition,
            SimulatorMode,
            SimulatorStatus,
            TickStats,
            RefreshResponse,
            ErrorResponse,
        )
    ),
    info(
        title = "Satboard API",
        description = "Dead-reckoned satellite state for dashboard clients",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Extrapolated satellite states"),
        (name = "status", description = "Scheduler status and refresh control")
    )
)]
pub struct ApiDoc;
