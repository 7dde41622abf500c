use thiserror::Error;

/// Validation errors for the ETo engine.
///
/// The engine fails fast on inputs that would otherwise propagate
/// NaN/Infinity through the trigonometric radiation terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EtoError {
    #[error("latitude {0} degrees is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("day of year {0} is outside 1-366")]
    DayOfYearOutOfRange(u16),

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}
