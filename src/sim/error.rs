use thiserror::Error;

/// Why the sanity gate refused a fix. Only ever surfaced as a diagnostic;
/// a rejected fix is skipped for the tick, not removed from the tracked set.
#[derive(Debug, Error, PartialEq)]
pub enum RejectReason {
    #[error("non-finite value in field {0}")]
    NonFinite(&'static str),
    #[error("velocity {0} km/s exceeds plausibility bound")]
    ImplausibleVelocity(f64),
    #[error("negative altitude {0} km")]
    NegativeAltitude(f64),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("degenerate orbital period {0} s")]
    DegeneratePeriod(f64),
}
