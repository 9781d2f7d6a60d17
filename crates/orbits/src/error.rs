use thiserror::Error;

/// Errors raised while validating orbital elements or solving Kepler's equation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("invalid orbital elements: semi-major axis must be positive (got {0})")]
    NonPositiveSemiMajorAxis(f64),
    #[error("invalid orbital elements: eccentricity must lie in [0, 1) (got {0})")]
    EccentricityOutOfRange(f64),
    #[error("invalid orbital elements: `{0}` is not finite")]
    NonFinite(&'static str),
    #[error("orbital period must be positive and finite (got {0} days)")]
    InvalidPeriod(f64),
    #[error(
        "Kepler solver did not converge for M = {mean_anomaly}, e = {eccentricity} \
         after {iterations} iterations (residual {residual:e})"
    )]
    NonConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
        residual: f64,
    },
}

impl OrbitError {
    /// Whether the error stems from invalid input parameters rather than a numeric failure.
    pub fn is_invalid_elements(&self) -> bool {
        !matches!(self, Self::NonConvergence { .. })
    }
}
