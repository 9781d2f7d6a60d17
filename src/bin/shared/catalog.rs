//! Catalog lookups shared by the binaries.
#![allow(dead_code)]

use std::path::Path;

use anyhow::{Context, anyhow, bail};
use orrery::config::{BodyConfig, load_bodies};
use orrery::core::vector::{self, Vector3};
use orrery::ephem::MeanElementsEphemeris;
use orrery::orbits::Orbit;

pub const DEFAULT_CATALOG: &str = "configs/bodies.yaml";
pub const DEFAULT_SCENE: &str = "configs/scene.toml";

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<BodyConfig>> {
    load_bodies(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

pub fn find_body<'a>(catalog: &'a [BodyConfig], name: &str) -> Option<&'a BodyConfig> {
    let name = name.trim();
    catalog.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Orbit of `name` about its parent: the catalog entry if there is one, otherwise the
/// mean-elements table evaluated at `jd`.
pub fn resolve_orbit(
    catalog: &[BodyConfig],
    name: &str,
    ephemeris: &MeanElementsEphemeris,
    jd: f64,
) -> anyhow::Result<Orbit> {
    match find_body(catalog, name) {
        Some(body) => body
            .orbit(ephemeris)?
            .ok_or_else(|| anyhow!("body `{}` has no orbit", body.name)),
        None => ephemeris
            .elements_at(name, jd)
            .with_context(|| format!("body `{name}` is neither in the catalog nor the mean-elements table")),
    }
}

/// Heliocentric position in AU, walking up the parent chain for moons.
pub fn heliocentric_position(
    catalog: &[BodyConfig],
    name: &str,
    ephemeris: &MeanElementsEphemeris,
    jd: f64,
) -> anyhow::Result<Vector3> {
    let mut position = vector::ZERO;
    let mut current = name.to_string();
    for _ in 0..=catalog.len() {
        let body = find_body(catalog, &current);
        if body.is_some_and(|b| b.orbit.is_none()) {
            return Ok(position);
        }
        let orbit = resolve_orbit(catalog, &current, ephemeris, jd)?;
        position = vector::add(&position, &orbit.position_at(jd));
        match body.and_then(|b| b.parent.clone().filter(|_| !b.is_heliocentric())) {
            Some(parent) => current = parent,
            None => return Ok(position),
        }
    }
    bail!("parent chain of `{name}` does not end at the Sun")
}
