//! Ephemeris providers: where heliocentric body positions come from.
//!
//! The geometry crate only needs numbers. Anything able to answer "where is body X at Julian
//! Date T" implements [`Ephemeris`]; two providers ship here, one evaluating approximate mean
//! planetary elements and one interpolating externally computed samples.

use orrery_core::angle::normalize_two_pi;
use orrery_core::vector::{self, Vector3};
use orrery_orbits::OrbitError;
use thiserror::Error;

pub mod epoch;
pub mod mean_elements;
pub mod sampled;

pub use epoch::{format_epoch, julian_date, parse_epoch};
pub use mean_elements::MeanElementsEphemeris;
pub use sampled::SampledEphemeris;

/// Heliocentric ecliptic coordinates as handed over by an ephemeris source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeliocentricCoordinates {
    /// Range (AU), ecliptic longitude and latitude (rad).
    Spherical {
        range_au: f64,
        longitude: f64,
        latitude: f64,
    },
    /// Rectangular ecliptic coordinates (AU).
    Rectangular { x: f64, y: f64, z: f64 },
}

impl HeliocentricCoordinates {
    pub fn to_rectangular(&self) -> Vector3 {
        match *self {
            Self::Spherical {
                range_au,
                longitude,
                latitude,
            } => {
                let (sin_b, cos_b) = latitude.sin_cos();
                let (sin_l, cos_l) = longitude.sin_cos();
                [
                    range_au * cos_b * cos_l,
                    range_au * cos_b * sin_l,
                    range_au * sin_b,
                ]
            }
            Self::Rectangular { x, y, z } => [x, y, z],
        }
    }

    /// Range (AU), longitude in `[0, 2π)` and latitude; the origin maps to zero angles.
    pub fn range_longitude_latitude(&self) -> (f64, f64, f64) {
        if let Self::Spherical {
            range_au,
            longitude,
            latitude,
        } = *self
        {
            return (range_au, normalize_two_pi(longitude), latitude);
        }
        let v = self.to_rectangular();
        let range_au = vector::norm(&v);
        if range_au == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            range_au,
            normalize_two_pi(v[1].atan2(v[0])),
            (v[2] / range_au).clamp(-1.0, 1.0).asin(),
        )
    }

    pub fn to_spherical(&self) -> Self {
        let (range_au, longitude, latitude) = self.range_longitude_latitude();
        Self::Spherical {
            range_au,
            longitude,
            latitude,
        }
    }
}

impl From<Vector3> for HeliocentricCoordinates {
    fn from(v: Vector3) -> Self {
        Self::Rectangular {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

/// Errors surfaced by ephemeris providers and epoch parsing.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("body `{0}` is not known to this ephemeris")]
    UnknownBody(String),
    #[error("epoch JD {jd} for `{body}` lies outside the sampled span [{start}, {end}]")]
    OutOfRange {
        body: String,
        jd: f64,
        start: f64,
        end: f64,
    },
    #[error("invalid epoch string `{epoch}`")]
    InvalidEpoch { epoch: String },
    #[error("failed to read ephemeris samples: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse ephemeris CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("non-finite value in ephemeris sample for `{body}` at record {record}")]
    InvalidSample { body: String, record: usize },
    #[error("derived orbit is invalid: {0}")]
    Orbit(#[from] OrbitError),
}

/// A source of heliocentric positions.
pub trait Ephemeris {
    /// Coordinates of `body` (case-insensitive) at Julian Date `jd`.
    fn heliocentric(&self, body: &str, jd: f64) -> Result<HeliocentricCoordinates, EphemerisError>;

    /// Rectangular ecliptic position in AU.
    fn position(&self, body: &str, jd: f64) -> Result<Vector3, EphemerisError> {
        Ok(self.heliocentric(body, jd)?.to_rectangular())
    }
}
