mod engine;
mod error;
mod extrapolate;
mod gate;
mod params;
mod stats;
mod types;

pub use engine::{Simulator, SimulatorConfig, SimulatorMode, SimulatorStatus, TickSet};
pub use error::RejectReason;
pub use extrapolate::{
    bearing_deg, derive_telemetry, extrapolate_position, normalize_longitude, GeoPosition,
    DEFAULT_DOPPLER_BAND,
};
pub use gate::{check_fix, validate_fix};
pub use params::{derive_parameters, estimate_period_seconds, OrbitalParameters, EARTH_RADIUS_KM};
pub use stats::TickStats;
pub use types::{ExtrapolatedState, Fix, FixSet, MarkerPosition};
