use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One authoritative orbital-state snapshot for a satellite, as delivered by
/// the upstream feed. Replaced wholesale on each refresh, never patched.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_km: f64,
    pub velocity_km_s: f64,
    pub heading_deg: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub doppler_factor: f64,
    pub fix_timestamp: DateTime<Utc>,
}

/// A complete refresh from the feed: one fix per satellite plus the shared
/// timestamp the whole batch was produced at.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixSet {
    #[serde(rename = "satellites")]
    pub fixes: Vec<Fix>,
    #[serde(rename = "lastUpdateTimestamp")]
    pub reference_timestamp: DateTime<Utc>,
}

impl FixSet {
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

/// Per-tick kinematic estimate for one satellite. Same shape as [`Fix`] minus
/// the timestamp; recomputed and republished every scheduler tick, never
/// stored.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtrapolatedState {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_km: f64,
    pub velocity_km_s: f64,
    pub heading_deg: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub doppler_factor: f64,
}

/// Position-only subset published on the rate-limited marker channel.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPosition {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl MarkerPosition {
    pub fn from_state(state: &ExtrapolatedState) -> Self {
        Self {
            id: state.id.clone(),
            lat: state.latitude_deg,
            lon: state.longitude_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_set_decodes_feed_payload() {
        let payload = r#"{
            "satellites": [{
                "_id": "25544",
                "name": "ISS (ZARYA)",
                "latitudeDeg": 12.5,
                "longitudeDeg": -45.25,
                "heightKm": 418.2,
                "velocityKmS": 7.66,
                "headingDeg": 51.6,
                "azimuthDeg": 120.0,
                "elevationDeg": 32.1,
                "rangeKm": 6789.0,
                "dopplerFactor": 1.00002,
                "fixTimestamp": "2026-08-25T12:00:00Z"
            }],
            "lastUpdateTimestamp": "2026-08-25T12:00:00Z"
        }"#;

        let set: FixSet = serde_json::from_str(payload).unwrap();
        assert_eq!(set.fixes.len(), 1);
        let fix = &set.fixes[0];
        assert_eq!(fix.id, "25544");
        assert_eq!(fix.name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(fix.latitude_deg, 12.5);
        assert_eq!(fix.height_km, 418.2);
        assert_eq!(set.reference_timestamp, fix.fix_timestamp);
    }

    #[test]
    fn marker_position_serializes_short_names() {
        let marker = MarkerPosition {
            id: "A".into(),
            lat: 1.0,
            lon: 2.0,
        };
        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["id"], "A");
        assert_eq!(json["lat"], 1.0);
        assert_eq!(json["lon"], 2.0);
    }
}
