use std::f64::consts::TAU;

use super::params::{OrbitalParameters, EARTH_RADIUS_KM};
use super::types::{ExtrapolatedState, Fix};

/// Secondary longitude oscillation amplitude, degrees.
const LON_WOBBLE_DEG: f64 = 5.0;
/// Altitude oscillation amplitude, km. Base altitudes of tracked objects are
/// always far above this, so the sum stays positive without re-clamping.
const HEIGHT_WOBBLE_KM: f64 = 10.0;
/// Cosmetic oscillation amplitudes around the last known values.
const DOPPLER_AMPLITUDE: f64 = 0.01;
const VELOCITY_AMPLITUDE_KM_S: f64 = 0.05;
/// Below this angular separation the bearing formula degenerates; fall back
/// to the fix's last known heading.
const MIN_BEARING_SEPARATION_DEG: f64 = 1.0e-9;

pub const DEFAULT_DOPPLER_BAND: (f64, f64) = (0.9, 1.1);

/// Extrapolated geodetic position plus the phase angle it was computed at.
/// The phase is carried along so telemetry derivation uses the same angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_km: f64,
    pub phase_rad: f64,
}

/// Wraps a longitude into (-180, 180].
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    let wrapped = lon_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Advances a fix by `elapsed_seconds` along the deterministic oscillation
/// model. Reads the fix, never mutates it; identical inputs produce
/// bit-identical output.
///
/// Latitude is recomputed as a bounded oscillation around the equator scaled
/// by the derived spread, not as a perturbation of the previous latitude, so
/// repeated calls at the same elapsed time are idempotent. At
/// `elapsed_seconds = 0` the model therefore reproduces the fix only
/// approximately: longitude within the wobble amplitude, height within the
/// height wobble, latitude within the spread.
pub fn extrapolate_position(
    fix: &Fix,
    params: &OrbitalParameters,
    elapsed_seconds: f64,
) -> GeoPosition {
    let mean_motion = TAU / params.period_seconds;
    let phase = (mean_motion * elapsed_seconds + params.phase_rad).rem_euclid(TAU);

    let latitude_deg = (params.spread_deg * phase.sin()).clamp(-90.0, 90.0);

    let base_speed_deg_s =
        (fix.velocity_km_s / (EARTH_RADIUS_KM + fix.height_km)).to_degrees();
    let drift_deg =
        (base_speed_deg_s * elapsed_seconds * params.precession_rate).rem_euclid(360.0);
    let longitude_deg =
        normalize_longitude(fix.longitude_deg + drift_deg + LON_WOBBLE_DEG * phase.cos());

    let height_km = fix.height_km + HEIGHT_WOBBLE_KM * (2.0 * phase).sin();

    GeoPosition {
        latitude_deg,
        longitude_deg,
        height_km,
        phase_rad: phase,
    }
}

/// Great-circle initial bearing from one geodetic point to another,
/// normalized to [0, 360).
pub fn bearing_deg(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
    let phi1 = from_lat.to_radians();
    let phi2 = to_lat.to_radians();
    let delta_lambda = (to_lon - from_lon).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Distance from Earth's center to the point, via spherical-to-Cartesian
/// conversion at radius `R + height`. A stand-in for slant range, not true
/// observer geometry.
fn center_range_km(latitude_deg: f64, longitude_deg: f64, height_km: f64) -> f64 {
    let r = EARTH_RADIUS_KM + height_km;
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    let x = r * lat.cos() * lon.cos();
    let y = r * lat.cos() * lon.sin();
    let z = r * lat.sin();
    (x * x + y * y + z * z).sqrt()
}

/// Derives the full telemetry record for a freshly extrapolated position.
///
/// Heading is the bearing from the previous tick's position; azimuth is a
/// simplified bearing of the new position relative to the origin meridian.
/// Both are approximations, not observer-relative geometry. Doppler and
/// velocity oscillate around the fix's last known values, with the Doppler
/// factor held inside `doppler_band`.
pub fn derive_telemetry(
    previous_lat: f64,
    previous_lon: f64,
    position: &GeoPosition,
    fix: &Fix,
    doppler_band: (f64, f64),
) -> ExtrapolatedState {
    let moved = (position.latitude_deg - previous_lat).abs() > MIN_BEARING_SEPARATION_DEG
        || (position.longitude_deg - previous_lon).abs() > MIN_BEARING_SEPARATION_DEG;
    let heading_deg = if moved {
        bearing_deg(
            previous_lat,
            previous_lon,
            position.latitude_deg,
            position.longitude_deg,
        )
    } else {
        fix.heading_deg.rem_euclid(360.0)
    };

    let azimuth_deg = bearing_deg(0.0, 0.0, position.latitude_deg, position.longitude_deg);

    let range_km = center_range_km(
        position.latitude_deg,
        position.longitude_deg,
        position.height_km,
    );

    let phase_sin = position.phase_rad.sin();
    // max/min rather than clamp: a misconfigured band must not panic a tick.
    let doppler_factor = (fix.doppler_factor + DOPPLER_AMPLITUDE * phase_sin)
        .max(doppler_band.0)
        .min(doppler_band.1);
    let velocity_km_s = fix.velocity_km_s + VELOCITY_AMPLITUDE_KM_S * phase_sin;

    ExtrapolatedState {
        id: fix.id.clone(),
        name: fix.name.clone(),
        latitude_deg: position.latitude_deg,
        longitude_deg: position.longitude_deg,
        height_km: position.height_km,
        velocity_km_s,
        heading_deg,
        azimuth_deg,
        elevation_deg: fix.elevation_deg,
        range_km,
        doppler_factor,
    }
}
