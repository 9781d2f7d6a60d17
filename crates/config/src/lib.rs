//! Configuration models and loaders for the Orrery.
//!
//! Body catalogs and scene settings are hand-authored files. Orbital elements are validated here,
//! once, so that per-frame evaluation downstream never has to.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use orrery_core::constants::J2000_JD;
use orrery_core::vector::Vector3;
use orrery_ephem::{EphemerisError, MeanElementsEphemeris, parse_epoch};
use orrery_orbits::{Orbit, OrbitError, OrbitTiming, OrbitalElements, Sampling};

/// Broad category of a body; drives rendering decisions such as comet tails.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
    Dwarf,
    Moon,
    Comet,
}

/// One body of the catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub kind: BodyKind,
    /// Body this one orbits; `None` (or `SUN`) means heliocentric.
    #[serde(default)]
    pub parent: Option<String>,
    /// Physical mean radius.
    pub radius_km: f64,
    /// Sphere radius in scene units.
    #[serde(default = "default_display_radius")]
    pub display_radius: f64,
    /// Exaggeration of the drawn orbit around the parent; moons are invisible at true scale.
    #[serde(default = "default_orbit_scale")]
    pub orbit_scale: f64,
    /// Absent for the body at the origin.
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,
}

/// How a body's orbit is specified.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "source")]
pub enum OrbitConfig {
    #[serde(rename = "elements")]
    Elements {
        semi_major_axis_au: f64,
        eccentricity: f64,
        #[serde(default)]
        inclination_deg: f64,
        #[serde(default)]
        ascending_node_deg: f64,
        #[serde(default)]
        periapsis_arg_deg: f64,
        #[serde(default)]
        mean_anomaly_deg: f64,
        #[serde(default = "default_epoch_jd")]
        epoch_jd: f64,
        #[serde(default)]
        period_days: Option<f64>,
    },
    /// Frozen from the built-in mean-elements table at `epoch`.
    #[serde(rename = "mean_elements")]
    MeanElements {
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        epoch: Option<String>,
    },
}

/// Which scene axis ecliptic north maps to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpAxis {
    /// Keep ecliptic coordinates as they are.
    Z,
    /// `(x, y, z)` becomes `(x, z, −y)` for Y-up engines.
    #[default]
    Y,
}

impl UpAxis {
    pub fn map(&self, v: &Vector3) -> Vector3 {
        match self {
            Self::Z => *v,
            Self::Y => [v[0], v[2], -v[1]],
        }
    }
}

/// Scene-wide visualisation settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene units per AU.
    pub au_scale: f64,
    pub orbit_segments: usize,
    pub orbit_sampling: Sampling,
    pub up_axis: UpAxis,
    pub clock: ClockConfig,
    pub camera: CameraConfig,
    /// Tail length in scene units at 1 AU from the Sun.
    pub comet_tail_length: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub start_epoch: String,
    pub days_per_second: f64,
    pub paused: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub follow: Option<String>,
    pub min_distance: f64,
    pub max_distance: f64,
    pub default_offset: Vector3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            au_scale: 100.0,
            orbit_segments: 256,
            orbit_sampling: Sampling::EccentricAnomaly,
            up_axis: UpAxis::default(),
            clock: ClockConfig::default(),
            camera: CameraConfig::default(),
            comet_tail_length: 5.0,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_epoch: "J2000".to_string(),
            days_per_second: 1.0,
            paused: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow: None,
            min_distance: 2.0,
            max_distance: 5_000.0,
            default_offset: [0.0, 40.0, 120.0],
        }
    }
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("body `{body}` has an invalid orbit: {source}")]
    InvalidOrbit {
        body: String,
        #[source]
        source: OrbitError,
    },
    #[error("body `{body}` orbits `{parent}` and needs an explicit `period_days`")]
    MissingPeriod { body: String, parent: String },
    #[error("body `{body}` references the ephemeris: {source}")]
    Ephemeris {
        body: String,
        #[source]
        source: EphemerisError,
    },
    #[error("invalid scene configuration: {0}")]
    InvalidScene(String),
}

fn default_display_radius() -> f64 {
    1.0
}

fn default_orbit_scale() -> f64 {
    1.0
}

fn default_epoch_jd() -> f64 {
    J2000_JD
}

impl BodyConfig {
    /// Whether the body orbits the Sun directly.
    pub fn is_heliocentric(&self) -> bool {
        self.parent
            .as_deref()
            .is_none_or(|parent| parent.eq_ignore_ascii_case("sun"))
    }

    /// Validated orbit for this body, or `None` for a body fixed at the origin.
    pub fn orbit(&self, ephemeris: &MeanElementsEphemeris) -> Result<Option<Orbit>, ConfigError> {
        let Some(config) = &self.orbit else {
            return Ok(None);
        };
        if !(self.orbit_scale.is_finite() && self.orbit_scale > 0.0) {
            return Err(ConfigError::InvalidScene(format!(
                "body `{}` orbit_scale must be positive (got {})",
                self.name, self.orbit_scale
            )));
        }
        let invalid = |source| ConfigError::InvalidOrbit {
            body: self.name.clone(),
            source,
        };

        let orbit = match config {
            OrbitConfig::Elements {
                semi_major_axis_au,
                eccentricity,
                inclination_deg,
                ascending_node_deg,
                periapsis_arg_deg,
                mean_anomaly_deg,
                epoch_jd,
                period_days,
            } => {
                let elements = OrbitalElements::from_degrees(
                    *semi_major_axis_au,
                    *eccentricity,
                    *inclination_deg,
                    *ascending_node_deg,
                    *periapsis_arg_deg,
                )
                .map_err(invalid)?;
                let period_days = match period_days {
                    Some(days) => *days,
                    None if self.is_heliocentric() => {
                        OrbitTiming::heliocentric_period_days(*semi_major_axis_au)
                    }
                    None => {
                        return Err(ConfigError::MissingPeriod {
                            body: self.name.clone(),
                            parent: self.parent.clone().unwrap_or_default(),
                        });
                    }
                };
                let timing =
                    OrbitTiming::new(*epoch_jd, mean_anomaly_deg.to_radians(), period_days)
                        .map_err(invalid)?;
                Orbit::new(elements, timing).map_err(invalid)?
            }
            OrbitConfig::MeanElements { body, epoch } => {
                let ephemeris_error = |source| ConfigError::Ephemeris {
                    body: self.name.clone(),
                    source,
                };
                let key = body.as_deref().unwrap_or(&self.name);
                let jd = match epoch {
                    Some(text) => parse_epoch(text).map_err(ephemeris_error)?,
                    None => J2000_JD,
                };
                ephemeris.elements_at(key, jd).map_err(ephemeris_error)?
            }
        };
        Ok(Some(orbit))
    }
}

impl SceneConfig {
    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::InvalidScene(msg));
        if !(self.au_scale.is_finite() && self.au_scale > 0.0) {
            return fail(format!("au_scale must be positive (got {})", self.au_scale));
        }
        if self.orbit_segments < 3 {
            return fail(format!(
                "orbit_segments must be at least 3 (got {})",
                self.orbit_segments
            ));
        }
        if !self.clock.days_per_second.is_finite() {
            return fail("clock.days_per_second must be finite".to_string());
        }
        let camera = &self.camera;
        if !(camera.min_distance.is_finite() && camera.min_distance > 0.0) {
            return fail(format!(
                "camera.min_distance must be positive (got {})",
                camera.min_distance
            ));
        }
        if !(camera.max_distance.is_finite() && camera.max_distance >= camera.min_distance) {
            return fail(format!(
                "camera.max_distance must be at least min_distance (got {})",
                camera.max_distance
            ));
        }
        if !(self.comet_tail_length.is_finite() && self.comet_tail_length >= 0.0) {
            return fail("comet_tail_length must be non-negative".to_string());
        }
        Ok(())
    }

    /// Julian Date the clock starts at.
    pub fn start_jd(&self) -> Result<f64, ConfigError> {
        parse_epoch(&self.clock.start_epoch).map_err(|source| ConfigError::Ephemeris {
            body: "clock.start_epoch".to_string(),
            source,
        })
    }
}

/// Load body configurations from a YAML list, a TOML record, or a directory of TOML records.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let path = path.as_ref();
    let bodies: Vec<BodyConfig> = load_records(path)?;
    tracing::debug!(count = bodies.len(), path = %path.display(), "loaded body catalog");
    Ok(bodies)
}

/// Load and validate scene settings from a TOML or YAML file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();
    let scene: SceneConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    scene.validate()?;
    tracing::debug!(path = %path.display(), "loaded scene configuration");
    Ok(scene)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
