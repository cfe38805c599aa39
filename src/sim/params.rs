use std::f64::consts::PI;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Standard gravitational parameter of Earth, km^3/s^2.
pub const MU_KM3_S2: f64 = 398_600.4418;

/// Pseudo-orbital parameters derived from a satellite id. Valid for the
/// lifetime of one fix; the period depends on the fix's altitude, so a new
/// fix invalidates the set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    /// Latitude oscillation amplitude, degrees, in [30, 90).
    pub spread_deg: f64,
    /// Initial angular offset, radians, in [0, 2*pi).
    pub phase_rad: f64,
    /// Scale on longitudinal drift, in [0.5, 1.5).
    pub precession_rate: f64,
    /// Approximate circular-orbit period at the fix's altitude, seconds.
    pub period_seconds: f64,
}

/// Polynomial hash of the id, wrapped to 32 bits. Pure function of the
/// characters, no external entropy: the same id always hashes the same on
/// every run and every machine.
fn hash_id(id: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in id.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}

/// Circular-orbit period at the given altitude, Kepler's third law.
/// Callers guarantee `altitude_km >= 0` (the sanity gate rejects negatives).
pub fn estimate_period_seconds(altitude_km: f64) -> f64 {
    let semi_major_km = EARTH_RADIUS_KM + altitude_km;
    2.0 * PI * (semi_major_km.powi(3) / MU_KM3_S2).sqrt()
}

/// Derives the reproducible parameter set for one (id, fix) pair. Total
/// function: defined for any id string and any non-negative altitude.
pub fn derive_parameters(id: &str, altitude_km: f64) -> OrbitalParameters {
    let hash = hash_id(id);
    OrbitalParameters {
        spread_deg: 30.0 + (hash % 60) as f64,
        phase_rad: (hash % 360) as f64 * PI / 180.0,
        precession_rate: 0.5 + (hash % 100) as f64 / 100.0,
        period_seconds: estimate_period_seconds(altitude_km),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_are_deterministic() {
        let a = derive_parameters("NOAA-19", 870.0);
        let b = derive_parameters("NOAA-19", 870.0);
        assert_eq!(a, b);
    }

    #[test]
    fn parameters_stay_in_documented_ranges() {
        let ids = [
            "25544", "43013", "ISS (ZARYA)", "a", "", "starlink-1234", "GPS BIIR-2",
            "漢字-sat", "x1", "x2", "x3",
        ];
        for id in ids {
            let p = derive_parameters(id, 550.0);
            assert!((30.0..90.0).contains(&p.spread_deg), "spread for {id}");
            assert!(
                (0.0..2.0 * PI).contains(&p.phase_rad),
                "phase for {id}"
            );
            assert!(
                (0.5..1.5).contains(&p.precession_rate),
                "precession for {id}"
            );
            assert!(p.period_seconds > 0.0);
        }
    }

    #[test]
    fn distinct_ids_spread_out() {
        let a = derive_parameters("sat-1", 550.0);
        let b = derive_parameters("sat-2", 550.0);
        assert_ne!((a.spread_deg, a.phase_rad), (b.spread_deg, b.phase_rad));
    }

    #[test]
    fn period_matches_kepler_for_leo() {
        // ISS-like orbit: ~408 km altitude gives roughly a 93-minute period.
        let period = estimate_period_seconds(408.0);
        assert!((5500.0..5650.0).contains(&period), "got {period}");
    }

    #[test]
    fn period_is_monotonic_in_altitude() {
        let altitudes = [0.0, 200.0, 408.0, 550.0, 870.0, 20_200.0, 35_786.0];
        for pair in altitudes.windows(2) {
            assert!(
                estimate_period_seconds(pair[0]) < estimate_period_seconds(pair[1]),
                "period not monotonic between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn geostationary_period_is_a_day() {
        let period = estimate_period_seconds(35_786.0);
        // Sidereal day, within a minute.
        assert!((period - 86_164.0).abs() < 60.0, "got {period}");
    }
}
