//! Positions on an orbit and polylines tracing the full ellipse.

use std::f64::consts::TAU;

use orrery_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};

use crate::anomaly::{AnomalyState, eccentric_to_true, true_to_eccentric};
use crate::elements::OrbitalElements;
use crate::frame::PerifocalRotation;
use crate::kepler::KeplerSolver;

/// Which angle locates the body on its ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    TrueAnomaly(f64),
    EccentricAnomaly(f64),
    /// Resolved through Kepler's equation.
    MeanAnomaly(f64),
}

/// Which anomaly is spaced evenly when sampling a polyline.
///
/// True-anomaly spacing gives equal angles seen from the focus, mean-anomaly spacing gives equal
/// time steps (dense near apoapsis), and eccentric-anomaly spacing gives the most uniform
/// curvature for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    #[default]
    TrueAnomaly,
    MeanAnomaly,
    EccentricAnomaly,
}

/// Radius and true anomaly for an input, without rotating out of the orbital plane.
fn polar_coordinates(
    elements: &OrbitalElements,
    input: OrbitInput,
    solver: &KeplerSolver,
) -> (f64, f64) {
    let e = elements.eccentricity;
    let eccentric = match input {
        OrbitInput::EccentricAnomaly(ea) => ea,
        OrbitInput::TrueAnomaly(nu) => true_to_eccentric(nu, e),
        OrbitInput::MeanAnomaly(m) => AnomalyState::from_mean(m, e, solver).eccentric,
    };
    let true_anomaly = match input {
        OrbitInput::TrueAnomaly(nu) => nu,
        _ => eccentric_to_true(eccentric, e),
    };
    let radius = elements.semi_major_axis * (1.0 - e * eccentric.cos());
    (radius, true_anomaly)
}

/// Distance from the focus for the given input.
pub fn radius_at(elements: &OrbitalElements, input: OrbitInput) -> f64 {
    polar_coordinates(elements, input, &KeplerSolver::default()).0
}

/// Point in the orbital plane: x towards periapsis, z zero.
pub fn perifocal_point(elements: &OrbitalElements, input: OrbitInput) -> Vector3 {
    let (r, nu) = polar_coordinates(elements, input, &KeplerSolver::default());
    [r * nu.cos(), r * nu.sin(), 0.0]
}

/// Position in the reference frame, unscaled, using the default Newton solver.
pub fn point_on_orbit(elements: &OrbitalElements, input: OrbitInput) -> Vector3 {
    point_on_orbit_with(elements, input, &KeplerSolver::default())
}

/// Position in the reference frame, resolving mean anomalies with `solver`.
pub fn point_on_orbit_with(
    elements: &OrbitalElements,
    input: OrbitInput,
    solver: &KeplerSolver,
) -> Vector3 {
    let rotation = PerifocalRotation::from_elements(elements);
    point_with_rotation(elements, &rotation, input, solver)
}

fn point_with_rotation(
    elements: &OrbitalElements,
    rotation: &PerifocalRotation,
    input: OrbitInput,
    solver: &KeplerSolver,
) -> Vector3 {
    let (r, nu) = polar_coordinates(elements, input, solver);
    rotation.to_reference(&[r * nu.cos(), r * nu.sin(), 0.0])
}

/// `segment_count` points evenly spaced in the chosen anomaly over `[0, 2π)`.
///
/// The first point is periapsis. The last point is one step short of it, so the sequence is a
/// closed loop for line-loop rendering without a duplicated vertex.
pub fn orbit_polyline(
    elements: &OrbitalElements,
    segment_count: usize,
    sampling: Sampling,
) -> Vec<Vector3> {
    let rotation = PerifocalRotation::from_elements(elements);
    let solver = KeplerSolver::default();
    let step = TAU / segment_count as f64;

    (0..segment_count)
        .map(|k| {
            let angle = k as f64 * step;
            let input = match sampling {
                Sampling::TrueAnomaly => OrbitInput::TrueAnomaly(angle),
                Sampling::MeanAnomaly => OrbitInput::MeanAnomaly(angle),
                Sampling::EccentricAnomaly => OrbitInput::EccentricAnomaly(angle),
            };
            point_with_rotation(elements, &rotation, input, &solver)
        })
        .collect()
}

/// Centre of the ellipse in the reference frame, `a·e` from the focus away from periapsis.
pub fn ellipse_center(elements: &OrbitalElements) -> Vector3 {
    let periapsis = PerifocalRotation::from_elements(elements).periapsis_direction();
    vector::scale(&periapsis, -elements.focus_offset())
}
