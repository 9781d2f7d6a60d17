//! Keplerian orbit geometry for visualisation.
//!
//! Converts orbital elements into Cartesian points in the reference (ecliptic) frame: the current
//! position of a body and the polyline tracing its full orbit. Everything here is a pure function
//! of its inputs; outputs are unscaled (AU in, AU out) and the caller applies any scene scale.

pub mod anomaly;
pub mod elements;
pub mod frame;
pub mod geometry;
pub mod kepler;
pub mod orbit;

mod error;

pub use anomaly::AnomalyState;
pub use elements::OrbitalElements;
pub use error::OrbitError;
pub use frame::PerifocalRotation;
pub use geometry::{OrbitInput, Sampling, orbit_polyline, point_on_orbit};
pub use kepler::{KeplerMethod, KeplerSolution, KeplerSolver};
pub use orbit::{Orbit, OrbitTiming};
