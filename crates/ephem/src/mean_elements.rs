//! Approximate planetary positions from mean Keplerian elements with linear secular rates.
//!
//! Elements and rates are the J2000 ecliptic values fitted over 1800–2050 AD (E. M. Standish,
//! "Keplerian Elements for Approximate Positions of the Major Planets"). Accuracy is a few
//! arcminutes for the inner planets, ample for visualisation.

use orrery_core::angle;
use orrery_core::constants::DAYS_PER_JULIAN_CENTURY;
use orrery_core::time::julian_centuries_since_j2000;
use orrery_orbits::{Orbit, OrbitalElements, OrbitTiming};

use crate::{Ephemeris, EphemerisError, HeliocentricCoordinates};

/// Element values at J2000 or their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct ElementSet {
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    mean_longitude_deg: f64,
    perihelion_longitude_deg: f64,
    ascending_node_deg: f64,
}

/// One row of the mean-elements table.
#[derive(Debug, Clone, Copy)]
pub struct MeanElementsEntry {
    pub name: &'static str,
    base: ElementSet,
    rate: ElementSet,
}

const fn set(a: f64, e: f64, i: f64, l: f64, peri: f64, node: f64) -> ElementSet {
    ElementSet {
        semi_major_axis_au: a,
        eccentricity: e,
        inclination_deg: i,
        mean_longitude_deg: l,
        perihelion_longitude_deg: peri,
        ascending_node_deg: node,
    }
}

/// The Earth entry is the Earth–Moon barycentre.
pub const MEAN_ELEMENTS: &[MeanElementsEntry] = &[
    MeanElementsEntry {
        name: "MERCURY",
        base: set(0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93),
        rate: set(0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81),
    },
    MeanElementsEntry {
        name: "VENUS",
        base: set(0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55),
        rate: set(0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18),
    },
    MeanElementsEntry {
        name: "EARTH",
        base: set(1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0),
        rate: set(0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0),
    },
    MeanElementsEntry {
        name: "MARS",
        base: set(1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91),
        rate: set(0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43),
    },
    MeanElementsEntry {
        name: "JUPITER",
        base: set(5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09),
        rate: set(-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06),
    },
    MeanElementsEntry {
        name: "SATURN",
        base: set(9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48),
        rate: set(-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94),
    },
    MeanElementsEntry {
        name: "URANUS",
        base: set(19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03),
        rate: set(-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89),
    },
    MeanElementsEntry {
        name: "NEPTUNE",
        base: set(30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74),
        rate: set(0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64),
    },
    MeanElementsEntry {
        name: "PLUTO",
        base: set(39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84),
        rate: set(-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82),
    },
];

impl MeanElementsEntry {
    fn at_centuries(&self, t: f64) -> ElementSet {
        let b = &self.base;
        let r = &self.rate;
        set(
            b.semi_major_axis_au + r.semi_major_axis_au * t,
            b.eccentricity + r.eccentricity * t,
            b.inclination_deg + r.inclination_deg * t,
            b.mean_longitude_deg + r.mean_longitude_deg * t,
            b.perihelion_longitude_deg + r.perihelion_longitude_deg * t,
            b.ascending_node_deg + r.ascending_node_deg * t,
        )
    }
}

/// Provider evaluating [`MEAN_ELEMENTS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementsEphemeris;

impl MeanElementsEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Names of all bodies in the table.
    pub fn bodies(&self) -> impl Iterator<Item = &'static str> {
        MEAN_ELEMENTS.iter().map(|entry| entry.name)
    }

    fn entry(&self, body: &str) -> Result<&'static MeanElementsEntry, EphemerisError> {
        let upper = body.to_ascii_uppercase();
        let key = match upper.as_str() {
            "EARTH BARYCENTER" | "EMB" | "EARTH-MOON BARYCENTER" => "EARTH",
            other => other,
        };
        MEAN_ELEMENTS
            .iter()
            .find(|entry| entry.name == key)
            .ok_or_else(|| EphemerisError::UnknownBody(body.to_string()))
    }

    /// Osculating-style orbit for `body` frozen at Julian Date `jd`.
    ///
    /// The argument of perihelion is `ϖ − Ω` and the mean anomaly at `jd` is `L − ϖ`; the period
    /// follows from the mean-longitude rate.
    pub fn elements_at(&self, body: &str, jd: f64) -> Result<Orbit, EphemerisError> {
        let entry = self.entry(body)?;
        let el = entry.at_centuries(julian_centuries_since_j2000(jd));

        let elements = OrbitalElements::from_degrees(
            el.semi_major_axis_au,
            el.eccentricity,
            el.inclination_deg,
            el.ascending_node_deg,
            el.perihelion_longitude_deg - el.ascending_node_deg,
        )?;
        let mean_anomaly_deg = el.mean_longitude_deg - el.perihelion_longitude_deg;
        let period_days = 360.0 * DAYS_PER_JULIAN_CENTURY / entry.rate.mean_longitude_deg;
        let timing = OrbitTiming::new(
            jd,
            angle::wrap_pi(mean_anomaly_deg.to_radians()),
            period_days,
        )?;
        Ok(Orbit::new(elements, timing)?)
    }
}

impl Ephemeris for MeanElementsEphemeris {
    fn heliocentric(&self, body: &str, jd: f64) -> Result<HeliocentricCoordinates, EphemerisError> {
        let orbit = self.elements_at(body, jd)?;
        Ok(orbit.position_at(jd).into())
    }
}
