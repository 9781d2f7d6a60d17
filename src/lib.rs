//! Orbital geometry for a solar-system orrery.
//!
//! The workspace crates are re-exported here so front-ends (the CLI, a renderer) depend on a
//! single library: Keplerian geometry in [`orbits`], ephemeris sources in [`ephem`], catalog and
//! scene settings in [`config`], the per-frame scene state in [`scene`], and file output in
//! [`export`].

pub mod logging;

pub use orrery_config as config;
pub use orrery_core as core;
pub use orrery_ephem as ephem;
pub use orrery_export as export;
pub use orrery_orbits as orbits;
pub use orrery_scene as scene;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
