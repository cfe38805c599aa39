use super::error::RejectReason;
use super::types::Fix;

/// Anything faster than this is corrupted data, not a satellite.
const MAX_VELOCITY_KM_S: f64 = 1.0e5;

/// Checks a fix against physical plausibility bounds. Returns the first
/// violated bound so the caller can log it.
pub fn check_fix(fix: &Fix) -> Result<(), RejectReason> {
    let fields = [
        ("latitudeDeg", fix.latitude_deg),
        ("longitudeDeg", fix.longitude_deg),
        ("heightKm", fix.height_km),
        ("velocityKmS", fix.velocity_km_s),
        ("headingDeg", fix.heading_deg),
        ("azimuthDeg", fix.azimuth_deg),
        ("elevationDeg", fix.elevation_deg),
        ("rangeKm", fix.range_km),
        ("dopplerFactor", fix.doppler_factor),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(RejectReason::NonFinite(name));
        }
    }

    if fix.velocity_km_s > MAX_VELOCITY_KM_S {
        return Err(RejectReason::ImplausibleVelocity(fix.velocity_km_s));
    }
    if fix.height_km < 0.0 {
        return Err(RejectReason::NegativeAltitude(fix.height_km));
    }
    if fix.latitude_deg.abs() > 90.0 {
        return Err(RejectReason::LatitudeOutOfRange(fix.latitude_deg));
    }
    if fix.longitude_deg.abs() > 180.0 {
        return Err(RejectReason::LongitudeOutOfRange(fix.longitude_deg));
    }

    Ok(())
}

/// Sanity gate in front of the extrapolator. Logs and returns `false` for a
/// fix that must be skipped this tick; never panics.
pub fn validate_fix(fix: &Fix) -> bool {
    match check_fix(fix) {
        Ok(()) => true,
        Err(reason) => {
            log::warn!("skipping fix {}: {}", fix.id, reason);
            false
        }
    }
}
