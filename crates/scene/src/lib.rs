//! Explicit scene state.
//!
//! A [`SceneState`] owns every body, the simulation clock and the follow camera. It is built once
//! from validated configuration and then mutated only through [`SceneState::step`] and
//! [`SceneState::advance`], so a render loop can evaluate it without ever handling an error.

use std::collections::HashMap;

use orrery_config::{BodyConfig, BodyKind, ConfigError, SceneConfig, UpAxis};
use orrery_core::vector::{self, Vector3};
use orrery_ephem::{EphemerisError, MeanElementsEphemeris, format_epoch};
use orrery_export::snapshot::{BodySnapshot, Snapshot, TailSnapshot};
use orrery_orbits::Orbit;
use thiserror::Error;

pub mod camera;
pub mod clock;
pub mod tail;

pub use camera::FollowCamera;
pub use clock::Clock;
pub use tail::{TailGeometry, comet_tail};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("body `{0}` is defined more than once")]
    DuplicateBody(String),
    #[error("body `{body}` orbits unknown parent `{parent}`")]
    UnknownParent { body: String, parent: String },
    #[error("parent references form a cycle among: {}", bodies.join(", "))]
    ParentCycle { bodies: Vec<String> },
    #[error("no body named `{0}` in the scene")]
    UnknownBody(String),
    #[error("cannot render epoch: {0}")]
    Epoch(#[from] EphemerisError),
}

/// One body placed in the scene hierarchy.
#[derive(Debug, Clone)]
pub struct SceneBody {
    pub name: String,
    pub kind: BodyKind,
    /// Index of the parent in [`SceneState::bodies`]; `None` for bodies centred on the Sun.
    pub parent: Option<usize>,
    pub display_radius: f64,
    pub orbit: Option<Orbit>,
    /// Scene units per AU of this body's local orbit.
    scale: f64,
    /// Orbit loop relative to the parent, already scaled and up-mapped.
    orbit_line: Vec<Vector3>,
    /// Heliocentric ecliptic position in AU at the current epoch.
    pub heliocentric_au: Vector3,
    /// Scene-space position at the current epoch.
    pub world_position: Vector3,
}

impl SceneBody {
    pub fn orbit_line(&self) -> &[Vector3] {
        &self.orbit_line
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    bodies: Vec<SceneBody>,
    index: HashMap<String, usize>,
    up_axis: UpAxis,
    au_scale: f64,
    comet_tail_length: f64,
    pub clock: Clock,
    pub camera: FollowCamera,
}

fn key(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

impl SceneState {
    /// Validate the catalog against the scene settings and place every body at the start epoch.
    pub fn build(
        catalog: &[BodyConfig],
        config: &SceneConfig,
        ephemeris: &MeanElementsEphemeris,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let start_jd = config.start_jd()?;

        let mut seen = HashMap::new();
        for (i, body) in catalog.iter().enumerate() {
            if seen.insert(key(&body.name), i).is_some() {
                return Err(SceneError::DuplicateBody(body.name.clone()));
            }
        }

        // Catalog index of each body's parent, `None` when it is centred on the Sun.
        let mut parents = Vec::with_capacity(catalog.len());
        for body in catalog {
            let parent = match body.parent.as_deref() {
                Some(parent) if !body.is_heliocentric() => {
                    let index =
                        seen.get(&key(parent))
                            .copied()
                            .ok_or_else(|| SceneError::UnknownParent {
                                body: body.name.clone(),
                                parent: parent.to_string(),
                            })?;
                    Some(index)
                }
                _ => None,
            };
            parents.push(parent);
        }

        let order = parent_first_order(catalog, &parents)?;
        let mut position_in_order = vec![0usize; catalog.len()];
        for (slot, &catalog_index) in order.iter().enumerate() {
            position_in_order[catalog_index] = slot;
        }

        let mut bodies = Vec::with_capacity(catalog.len());
        for &catalog_index in &order {
            let body = &catalog[catalog_index];
            let orbit = body.orbit(ephemeris)?;
            let scale = config.au_scale * body.orbit_scale;
            let orbit_line = orbit
                .as_ref()
                .map(|orbit| {
                    orbit
                        .polyline(config.orbit_segments, config.orbit_sampling)
                        .iter()
                        .map(|p| config.up_axis.map(&vector::scale(p, scale)))
                        .collect()
                })
                .unwrap_or_default();
            bodies.push(SceneBody {
                name: body.name.clone(),
                kind: body.kind,
                parent: parents[catalog_index].map(|p| position_in_order[p]),
                display_radius: body.display_radius,
                orbit,
                scale,
                orbit_line,
                heliocentric_au: vector::ZERO,
                world_position: vector::ZERO,
            });
        }
        let index = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (key(&b.name), i))
            .collect();

        let up = config.up_axis.map(&[0.0, 0.0, 1.0]);
        let mut scene = Self {
            bodies,
            index,
            up_axis: config.up_axis,
            au_scale: config.au_scale,
            comet_tail_length: config.comet_tail_length,
            clock: Clock::from_config(&config.clock, start_jd),
            camera: FollowCamera::new(&config.camera, up),
        };
        scene.follow(config.camera.follow.as_deref())?;
        scene.step(start_jd);
        tracing::debug!(
            bodies = scene.bodies.len(),
            start_jd,
            "built scene"
        );
        Ok(scene)
    }

    /// Bodies with parents ahead of their children.
    pub fn bodies(&self) -> &[SceneBody] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&SceneBody> {
        self.index.get(&key(name)).map(|&i| &self.bodies[i])
    }

    pub fn world_position(&self, name: &str) -> Option<Vector3> {
        self.body(name).map(|b| b.world_position)
    }

    pub fn jd(&self) -> f64 {
        self.clock.jd
    }

    pub fn au_scale(&self) -> f64 {
        self.au_scale
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    /// Place every body at Julian Date `jd` and sync the clock to it.
    pub fn step(&mut self, jd: f64) {
        self.clock.jd = jd;
        for i in 0..self.bodies.len() {
            let (parent_helio, parent_world) = match self.bodies[i].parent {
                Some(p) => (self.bodies[p].heliocentric_au, self.bodies[p].world_position),
                None => (vector::ZERO, vector::ZERO),
            };
            let body = &mut self.bodies[i];
            let local_au = body
                .orbit
                .as_ref()
                .map(|orbit| orbit.position_at(jd))
                .unwrap_or(vector::ZERO);
            body.heliocentric_au = vector::add(&parent_helio, &local_au);
            body.world_position = vector::add(
                &parent_world,
                &self.up_axis.map(&vector::scale(&local_au, body.scale)),
            );
        }
    }

    /// Run the clock for `dt_seconds` of real time, then step to the new epoch.
    pub fn advance(&mut self, dt_seconds: f64) {
        let jd = self.clock.tick(dt_seconds);
        self.step(jd);
    }

    /// Point the camera at `name`, or at the origin for `None`.
    pub fn follow(&mut self, name: Option<&str>) -> Result<(), SceneError> {
        let target = match name {
            Some(name) => Some(
                self.body(name)
                    .map(|b| b.name.clone())
                    .ok_or_else(|| SceneError::UnknownBody(name.to_string()))?,
            ),
            None => None,
        };
        self.camera.set_target(target);
        Ok(())
    }

    /// Orbit loop of `name` in world space, following its parent's current position.
    pub fn orbit_line_world(&self, name: &str) -> Result<Vec<Vector3>, SceneError> {
        let body = self
            .body(name)
            .ok_or_else(|| SceneError::UnknownBody(name.to_string()))?;
        let origin = body
            .parent
            .map(|p| self.bodies[p].world_position)
            .unwrap_or(vector::ZERO);
        Ok(body
            .orbit_line
            .iter()
            .map(|p| vector::add(&origin, p))
            .collect())
    }

    /// Tail geometry for every comet, in scene space.
    pub fn tails(&self) -> Vec<(&str, TailGeometry)> {
        self.bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Comet)
            .map(|b| (b.name.as_str(), self.tail_for(b)))
            .collect()
    }

    fn tail_for(&self, body: &SceneBody) -> TailGeometry {
        let tail = comet_tail(&body.heliocentric_au, &vector::ZERO, self.comet_tail_length);
        TailGeometry {
            direction: self.up_axis.map(&tail.direction),
            length: tail.length,
        }
    }

    /// Serializable view of the scene at the current epoch.
    pub fn snapshot(&self) -> Result<Snapshot, SceneError> {
        let bodies = self
            .bodies
            .iter()
            .map(|b| BodySnapshot {
                name: b.name.clone(),
                kind: kind_label(b.kind).to_string(),
                parent: b.parent.map(|p| self.bodies[p].name.clone()),
                position: b.world_position,
                display_radius: b.display_radius,
                heliocentric_distance_au: vector::norm(&b.heliocentric_au),
                tail: (b.kind == BodyKind::Comet).then(|| {
                    let tail = self.tail_for(b);
                    TailSnapshot {
                        direction: tail.direction,
                        length: tail.length,
                    }
                }),
            })
            .collect();
        Ok(Snapshot {
            epoch_jd: self.clock.jd,
            epoch_utc: format_epoch(self.clock.jd)?,
            au_scale: self.au_scale,
            bodies,
        })
    }
}

fn kind_label(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Star => "star",
        BodyKind::Planet => "planet",
        BodyKind::Dwarf => "dwarf",
        BodyKind::Moon => "moon",
        BodyKind::Comet => "comet",
    }
}

/// Catalog indices ordered so that every parent precedes its children; input order is kept
/// otherwise.
fn parent_first_order(
    catalog: &[BodyConfig],
    parents: &[Option<usize>],
) -> Result<Vec<usize>, SceneError> {
    let mut placed = vec![false; catalog.len()];
    let mut order = Vec::with_capacity(catalog.len());
    while order.len() < catalog.len() {
        let before = order.len();
        for i in 0..catalog.len() {
            if !placed[i] && parents[i].is_none_or(|p| placed[p]) {
                placed[i] = true;
                order.push(i);
            }
        }
        if order.len() == before {
            let bodies = (0..catalog.len())
                .filter(|&i| !placed[i])
                .map(|i| catalog[i].name.clone())
                .collect();
            return Err(SceneError::ParentCycle { bodies });
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::constants::J2000_JD;

    const CATALOG: &str = r#"
- name: MOON
  kind: moon
  parent: EARTH
  radius_km: 1737
  orbit_scale: 30
  orbit:
    source: elements
    semi_major_axis_au: 0.00257
    eccentricity: 0.0549
    period_days: 27.321661
- name: SUN
  kind: star
  radius_km: 695700
- name: EARTH
  radius_km: 6371
  orbit:
    source: elements
    semi_major_axis_au: 1.0
    eccentricity: 0.0167
    periapsis_arg_deg: 102.9
- name: COMET
  kind: comet
  radius_km: 5
  orbit:
    source: elements
    semi_major_axis_au: 3.0
    eccentricity: 0.8
    mean_anomaly_deg: 0.0
"#;

    fn catalog() -> Vec<BodyConfig> {
        serde_yaml::from_str(CATALOG).unwrap()
    }

    fn scene() -> SceneState {
        SceneState::build(
            &catalog(),
            &SceneConfig::default(),
            &MeanElementsEphemeris::new(),
        )
        .unwrap()
    }

    #[test]
    fn parents_precede_children() {
        let scene = scene();
        let names: Vec<_> = scene.bodies().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["SUN", "EARTH", "COMET", "MOON"]);
        let moon = scene.body("moon").unwrap();
        assert_eq!(moon.parent.map(|p| scene.bodies()[p].name.as_str()), Some("EARTH"));
        assert_eq!(scene.body("SUN").unwrap().world_position, [0.0; 3]);
        assert_eq!(scene.jd(), J2000_JD);
    }

    #[test]
    fn moon_follows_earth() {
        let mut scene = scene();
        for jd in [J2000_JD, J2000_JD + 91.3, J2000_JD + 200.0] {
            scene.step(jd);
            let earth = scene.world_position("EARTH").unwrap();
            let moon = scene.world_position("MOON").unwrap();
            let separation = vector::distance(&earth, &moon);
            let a = 0.00257 * 100.0 * 30.0;
            assert!(
                separation >= a * (1.0 - 0.0549) - 1e-9 && separation <= a * (1.0 + 0.0549) + 1e-9,
                "separation = {}",
                separation
            );
            for p in scene.orbit_line_world("MOON").unwrap() {
                assert!(vector::distance(&p, &earth) <= a * (1.0 + 0.0549) + 1e-9);
            }
            let helio = scene.body("MOON").unwrap().heliocentric_au;
            assert!((vector::norm(&helio) - 1.0).abs() < 0.02);
        }
    }

    #[test]
    fn y_up_keeps_the_ecliptic_horizontal() {
        let mut scene = scene();
        scene.step(J2000_JD + 42.0);
        let earth = scene.world_position("EARTH").unwrap();
        assert!(earth[1].abs() < 1e-9, "earth = {:?}", earth);
        let r = vector::norm(&earth);
        assert!(r > 100.0 * (1.0 - 0.0167) - 1e-9 && r < 100.0 * (1.0 + 0.0167) + 1e-9);
        assert_eq!(scene.orbit_line_world("EARTH").unwrap().len(), 256);
        assert!(scene.orbit_line_world("SUN").unwrap().is_empty());
    }

    #[test]
    fn advance_respects_clock_state() {
        let mut scene = scene();
        scene.clock.set_rate(2.0);
        scene.advance(3.0);
        assert_eq!(scene.jd(), J2000_JD + 6.0);
        let earth = scene.world_position("EARTH").unwrap();
        scene.clock.pause();
        scene.advance(100.0);
        assert_eq!(scene.jd(), J2000_JD + 6.0);
        assert_eq!(scene.world_position("EARTH").unwrap(), earth);
    }

    #[test]
    fn camera_tracks_followed_body() {
        let mut scene = scene();
        scene.follow(Some("earth")).unwrap();
        assert_eq!(scene.camera.target(), Some("EARTH"));
        let earth = scene.world_position("EARTH").unwrap();
        assert_eq!(scene.camera.look_at(&scene), earth);
        let eye = scene.camera.eye(&scene);
        assert!((vector::distance(&eye, &earth) - scene.camera.distance()).abs() < 1e-9);
        assert!(matches!(
            scene.follow(Some("VULCAN")),
            Err(SceneError::UnknownBody(_))
        ));
        scene.follow(None).unwrap();
        assert_eq!(scene.camera.look_at(&scene), [0.0; 3]);
    }

    #[test]
    fn comet_tail_points_away_from_sun() {
        let scene = scene();
        let tails = scene.tails();
        assert_eq!(tails.len(), 1);
        let (name, tail) = tails[0];
        assert_eq!(name, "COMET");
        let comet = scene.world_position("COMET").unwrap();
        assert!(vector::dot(&tail.direction, &comet) > 0.0);
        // At periapsis, r = 0.6 AU.
        assert!((tail.length - 5.0 / 0.36).abs() < 1e-6, "length = {}", tail.length);
    }

    #[test]
    fn snapshot_lists_every_body() {
        let snapshot = scene().snapshot().unwrap();
        assert_eq!(snapshot.epoch_utc, "2000-01-01T12:00:00Z");
        assert_eq!(snapshot.bodies.len(), 4);
        let moon = snapshot.bodies.iter().find(|b| b.name == "MOON").unwrap();
        assert_eq!(moon.parent.as_deref(), Some("EARTH"));
        assert_eq!(moon.kind, "moon");
        let comet = snapshot.bodies.iter().find(|b| b.name == "COMET").unwrap();
        assert!(comet.tail.is_some());
    }

    #[test]
    fn structural_errors() {
        let eph = MeanElementsEphemeris::new();
        let config = SceneConfig::default();

        let mut duplicated = catalog();
        duplicated.push(duplicated[1].clone());
        assert!(matches!(
            SceneState::build(&duplicated, &config, &eph),
            Err(SceneError::DuplicateBody(name)) if name == "SUN"
        ));

        let mut orphan = catalog();
        orphan[0].parent = Some("PLANET X".to_string());
        assert!(matches!(
            SceneState::build(&orphan, &config, &eph),
            Err(SceneError::UnknownParent { ref parent, .. }) if parent == "PLANET X"
        ));

        let mut cycle = catalog();
        cycle[2].parent = Some("MOON".to_string());
        if let Some(orrery_config::OrbitConfig::Elements { period_days, .. }) = &mut cycle[2].orbit {
            *period_days = Some(365.25);
        }
        match SceneState::build(&cycle, &config, &eph) {
            Err(SceneError::ParentCycle { bodies }) => assert_eq!(bodies, ["MOON", "EARTH"]),
            other => panic!("unexpected {:?}", other.map(|s| s.bodies().len())),
        }

        let following_nobody = SceneConfig {
            camera: orrery_config::CameraConfig {
                follow: Some("VULCAN".to_string()),
                ..Default::default()
            },
            ..SceneConfig::default()
        };
        assert!(matches!(
            SceneState::build(&catalog(), &following_nobody, &eph),
            Err(SceneError::UnknownBody(_))
        ));
    }

    #[test]
    fn sun_parent_is_heliocentric_even_without_a_sun_entry() {
        let mut bodies = catalog();
        bodies.retain(|b| b.name != "SUN");
        bodies[1].parent = Some("Sun".to_string());
        let scene =
            SceneState::build(&bodies, &SceneConfig::default(), &MeanElementsEphemeris::new())
                .unwrap();
        assert!(scene.body("EARTH").unwrap().parent.is_none());
    }
}
