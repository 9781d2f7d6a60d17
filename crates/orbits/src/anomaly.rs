//! Conversions between mean, eccentric and true anomaly.

use crate::kepler::KeplerSolver;

/// The three anomalies describing where a body sits on its ellipse at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyState {
    pub mean: f64,
    pub eccentric: f64,
    pub true_anomaly: f64,
}

impl AnomalyState {
    /// Resolve from a mean anomaly by solving Kepler's equation.
    pub fn from_mean(mean: f64, eccentricity: f64, solver: &KeplerSolver) -> Self {
        let eccentric = solver.solve(mean, eccentricity).eccentric_anomaly;
        Self {
            mean,
            eccentric,
            true_anomaly: eccentric_to_true(eccentric, eccentricity),
        }
    }

    pub fn from_eccentric(eccentric: f64, eccentricity: f64) -> Self {
        Self {
            mean: eccentric_to_mean(eccentric, eccentricity),
            eccentric,
            true_anomaly: eccentric_to_true(eccentric, eccentricity),
        }
    }

    pub fn from_true(true_anomaly: f64, eccentricity: f64) -> Self {
        let eccentric = true_to_eccentric(true_anomaly, eccentricity);
        Self {
            mean: eccentric_to_mean(eccentric, eccentricity),
            eccentric,
            true_anomaly,
        }
    }
}

/// `ν = atan2(√(1−e²)·sin E, cos E − e)`, in `(−π, π]`.
pub fn eccentric_to_true(eccentric: f64, eccentricity: f64) -> f64 {
    let factor = (1.0 - eccentricity * eccentricity).sqrt();
    (factor * eccentric.sin()).atan2(eccentric.cos() - eccentricity)
}

/// `E = atan2(√(1−e²)·sin ν, e + cos ν)`, in `(−π, π]`.
pub fn true_to_eccentric(true_anomaly: f64, eccentricity: f64) -> f64 {
    let factor = (1.0 - eccentricity * eccentricity).sqrt();
    (factor * true_anomaly.sin()).atan2(eccentricity + true_anomaly.cos())
}

/// Kepler's equation evaluated forward: `M = E − e·sin E`.
pub fn eccentric_to_mean(eccentric: f64, eccentricity: f64) -> f64 {
    eccentric - eccentricity * eccentric.sin()
}
