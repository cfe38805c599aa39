use serde::Serialize;

use super::types::ExtrapolatedState;

/// Counts and simple aggregates over the latest extrapolated set, recomputed
/// every tick for the status endpoint.
#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TickStats {
    /// Objects successfully extrapolated this tick.
    pub extrapolated: usize,
    /// Objects skipped by the sanity gate this tick.
    pub skipped: usize,
    pub mean_height_km: f64,
    pub mean_velocity_km_s: f64,
}

impl TickStats {
    pub fn from_states(states: &[ExtrapolatedState], skipped: usize) -> Self {
        if states.is_empty() {
            return Self {
                skipped,
                ..Self::default()
            };
        }
        let n = states.len() as f64;
        Self {
            extrapolated: states.len(),
            skipped,
            mean_height_km: states.iter().map(|s| s.height_km).sum::<f64>() / n,
            mean_velocity_km_s: states.iter().map(|s| s.velocity_km_s).sum::<f64>() / n,
        }
    }
}
