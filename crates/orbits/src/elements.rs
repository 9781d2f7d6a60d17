//! Classical orbital elements describing a Keplerian ellipse.

use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Size, shape and orientation of an elliptical orbit.
///
/// Distances are in AU and angles in radians. Instances built through [`OrbitalElements::new`]
/// are guaranteed valid (`a > 0`, `0 <= e < 1`, all values finite); the geometry functions assume
/// that guarantee and do not re-check it per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis `a` (AU).
    pub semi_major_axis: f64,
    /// Eccentricity `e`.
    pub eccentricity: f64,
    /// Inclination `i` to the reference plane (rad).
    pub inclination: f64,
    /// Longitude of the ascending node `Ω` (rad).
    pub ascending_node: f64,
    /// Argument of periapsis `ω` (rad).
    pub periapsis_arg: f64,
}

impl OrbitalElements {
    /// Construct and validate a set of elements.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        ascending_node: f64,
        periapsis_arg: f64,
    ) -> Result<Self, OrbitError> {
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node,
            periapsis_arg,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Same as [`OrbitalElements::new`] with the three angles given in degrees.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        periapsis_arg_deg: f64,
    ) -> Result<Self, OrbitError> {
        Self::new(
            semi_major_axis,
            eccentricity,
            inclination_deg.to_radians(),
            ascending_node_deg.to_radians(),
            periapsis_arg_deg.to_radians(),
        )
    }

    /// A circular orbit of radius `a` lying in the reference plane.
    pub fn circular(semi_major_axis: f64) -> Result<Self, OrbitError> {
        Self::new(semi_major_axis, 0.0, 0.0, 0.0, 0.0)
    }

    /// Check the ellipse invariants.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("ascending_node", self.ascending_node),
            ("periapsis_arg", self.periapsis_arg),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::NonFinite(name));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(OrbitError::NonPositiveSemiMajorAxis(self.semi_major_axis));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitError::EccentricityOutOfRange(self.eccentricity));
        }
        Ok(())
    }

    /// Semi-minor axis `b = a·√(1−e²)`.
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * self.eccentricity_factor()
    }

    /// Distance from the ellipse centre to the focus, `a·e`.
    pub fn focus_offset(&self) -> f64 {
        self.semi_major_axis * self.eccentricity
    }

    /// Closest distance to the focus, `a·(1−e)`.
    pub fn periapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus, `a·(1+e)`.
    pub fn apoapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Semi-latus rectum `p = a·(1−e²)`.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// `√(1−e²)`, shared by the anomaly conversions.
    pub(crate) fn eccentricity_factor(&self) -> f64 {
        (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }
}
