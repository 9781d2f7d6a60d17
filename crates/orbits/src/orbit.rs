//! Time-parametrised orbits: elements plus the mean motion that moves a body along them.

use std::f64::consts::TAU;

use orrery_core::constants::SIDEREAL_YEAR_DAYS;
use orrery_core::vector::Vector3;
use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyState;
use crate::elements::OrbitalElements;
use crate::error::OrbitError;
use crate::frame::PerifocalRotation;
use crate::geometry::{self, OrbitInput, Sampling};
use crate::kepler::KeplerSolver;

/// Where the body was at a reference epoch and how long one revolution takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitTiming {
    /// Julian Date of the reference epoch.
    pub epoch_jd: f64,
    /// Mean anomaly at `epoch_jd` (rad).
    pub mean_anomaly_at_epoch: f64,
    /// Orbital period (days).
    pub period_days: f64,
}

impl OrbitTiming {
    pub fn new(
        epoch_jd: f64,
        mean_anomaly_at_epoch: f64,
        period_days: f64,
    ) -> Result<Self, OrbitError> {
        if !epoch_jd.is_finite() {
            return Err(OrbitError::NonFinite("epoch_jd"));
        }
        if !mean_anomaly_at_epoch.is_finite() {
            return Err(OrbitError::NonFinite("mean_anomaly_at_epoch"));
        }
        if !(period_days.is_finite() && period_days > 0.0) {
            return Err(OrbitError::InvalidPeriod(period_days));
        }
        Ok(Self {
            epoch_jd,
            mean_anomaly_at_epoch,
            period_days,
        })
    }

    /// Heliocentric period from Kepler's third law, `P = a^1.5` sidereal years.
    pub fn heliocentric_period_days(semi_major_axis_au: f64) -> f64 {
        SIDEREAL_YEAR_DAYS * semi_major_axis_au.powf(1.5)
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period_days
    }

    /// `M(t) = M0 + n·(t − epoch)`; not reduced, the Kepler solver handles whole turns.
    pub fn mean_anomaly_at(&self, jd: f64) -> f64 {
        self.mean_anomaly_at_epoch + self.mean_motion() * (jd - self.epoch_jd)
    }
}

/// A validated ellipse that a body traverses over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub elements: OrbitalElements,
    pub timing: OrbitTiming,
    rotation: PerifocalRotation,
    solver: KeplerSolver,
}

impl Orbit {
    pub fn new(elements: OrbitalElements, timing: OrbitTiming) -> Result<Self, OrbitError> {
        elements.validate()?;
        Ok(Self {
            elements,
            timing,
            rotation: PerifocalRotation::from_elements(&elements),
            solver: KeplerSolver::default(),
        })
    }

    /// Replace the Kepler solver used for time evaluations.
    pub fn with_solver(mut self, solver: KeplerSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn mean_anomaly_at(&self, jd: f64) -> f64 {
        self.timing.mean_anomaly_at(jd)
    }

    pub fn anomaly_at(&self, jd: f64) -> AnomalyState {
        AnomalyState::from_mean(
            self.mean_anomaly_at(jd),
            self.elements.eccentricity,
            &self.solver,
        )
    }

    /// Position relative to the focus at Julian Date `jd`, in AU.
    pub fn position_at(&self, jd: f64) -> Vector3 {
        let state = self.anomaly_at(jd);
        let r = self.elements.semi_major_axis
            * (1.0 - self.elements.eccentricity * state.eccentric.cos());
        let nu = state.true_anomaly;
        self.rotation.to_reference(&[r * nu.cos(), r * nu.sin(), 0.0])
    }

    /// Closed orbit loop; see [`geometry::orbit_polyline`].
    pub fn polyline(&self, segment_count: usize, sampling: Sampling) -> Vec<Vector3> {
        geometry::orbit_polyline(&self.elements, segment_count, sampling)
    }

    /// Position for an explicit anomaly, ignoring time.
    pub fn point(&self, input: OrbitInput) -> Vector3 {
        geometry::point_on_orbit_with(&self.elements, input, &self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::constants::J2000_JD;
    use orrery_core::vector;

    fn earthlike() -> Orbit {
        let elements = OrbitalElements::from_degrees(1.0, 0.0167, 0.0, 0.0, 102.9).unwrap();
        let timing = OrbitTiming::new(J2000_JD, 0.0, 365.256).unwrap();
        Orbit::new(elements, timing).unwrap()
    }

    #[test]
    fn returns_to_start_after_one_period() {
        let orbit = earthlike();
        let start = orbit.position_at(J2000_JD + 10.0);
        let later = orbit.position_at(J2000_JD + 10.0 + orbit.timing.period_days);
        assert!(vector::distance(&start, &later) < 1e-9);
        let quarter = orbit.position_at(J2000_JD + 10.0 + orbit.timing.period_days / 4.0);
        assert!(vector::distance(&start, &quarter) > 1.0);
    }

    #[test]
    fn epoch_position_is_periapsis_when_mean_anomaly_is_zero() {
        let orbit = earthlike();
        let p = orbit.position_at(J2000_JD);
        assert!((vector::norm(&p) - orbit.elements.periapsis_distance()).abs() < 1e-12);
        assert!(vector::distance(&p, &orbit.point(OrbitInput::TrueAnomaly(0.0))) < 1e-12);
    }

    #[test]
    fn rejects_bad_timing() {
        assert_eq!(
            OrbitTiming::new(J2000_JD, 0.0, 0.0),
            Err(OrbitError::InvalidPeriod(0.0))
        );
        assert_eq!(
            OrbitTiming::new(f64::INFINITY, 0.0, 1.0),
            Err(OrbitError::NonFinite("epoch_jd"))
        );
    }

    #[test]
    fn third_law_period_for_mars() {
        let days = OrbitTiming::heliocentric_period_days(1.523_679);
        assert!((days - 687.0).abs() < 1.0, "days = {days}");
    }
}
