//! Positions interpolated from externally computed heliocentric samples.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use orrery_core::vector::{self, Vector3};
use serde::Deserialize;

use crate::{Ephemeris, EphemerisError, HeliocentricCoordinates};

#[derive(Debug, Deserialize)]
struct SampleRecord {
    body: String,
    jd: f64,
    x_au: f64,
    y_au: f64,
    z_au: f64,
}

/// A rectangular position sample at one Julian Date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub jd: f64,
    pub position_au: Vector3,
}

/// Piecewise-linear ephemeris over tabulated samples, keyed by upper-cased body name.
#[derive(Debug, Clone, Default)]
pub struct SampledEphemeris {
    tracks: HashMap<String, Vec<Sample>>,
}

impl SampledEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `body,jd,x_au,y_au,z_au` rows from a CSV file with a header line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EphemerisError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EphemerisError> {
        let mut csv = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut ephemeris = Self::new();
        for (index, row) in csv.deserialize::<SampleRecord>().enumerate() {
            let record = row?;
            let values = [record.jd, record.x_au, record.y_au, record.z_au];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(EphemerisError::InvalidSample {
                    body: record.body,
                    record: index + 1,
                });
            }
            ephemeris.push(
                &record.body,
                Sample {
                    jd: record.jd,
                    position_au: [record.x_au, record.y_au, record.z_au],
                },
            );
        }
        ephemeris.finish();
        tracing::debug!(bodies = ephemeris.tracks.len(), "loaded sampled ephemeris");
        Ok(ephemeris)
    }

    /// Add samples for a body programmatically.
    pub fn insert<I>(&mut self, body: &str, samples: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        for sample in samples {
            self.push(body, sample);
        }
        self.finish();
    }

    /// Sampled time span `(first, last)` for a body.
    pub fn span(&self, body: &str) -> Option<(f64, f64)> {
        let track = self.tracks.get(&body.to_ascii_uppercase())?;
        Some((track.first()?.jd, track.last()?.jd))
    }

    fn push(&mut self, body: &str, sample: Sample) {
        self.tracks
            .entry(body.to_ascii_uppercase())
            .or_default()
            .push(sample);
    }

    fn finish(&mut self) {
        for track in self.tracks.values_mut() {
            track.sort_by(|a, b| a.jd.total_cmp(&b.jd));
            track.dedup_by(|later, earlier| later.jd == earlier.jd);
        }
    }

    fn interpolate(&self, body: &str, jd: f64) -> Result<Vector3, EphemerisError> {
        let track = self
            .tracks
            .get(&body.to_ascii_uppercase())
            .filter(|track| !track.is_empty())
            .ok_or_else(|| EphemerisError::UnknownBody(body.to_string()))?;

        let first = track[0];
        let last = track[track.len() - 1];
        if !(first.jd..=last.jd).contains(&jd) {
            return Err(EphemerisError::OutOfRange {
                body: body.to_string(),
                jd,
                start: first.jd,
                end: last.jd,
            });
        }

        let upper = track.partition_point(|s| s.jd < jd);
        if upper == 0 {
            return Ok(first.position_au);
        }
        let after = track[upper];
        let before = track[upper - 1];
        let t = (jd - before.jd) / (after.jd - before.jd);
        let delta = vector::sub(&after.position_au, &before.position_au);
        Ok(vector::add(&before.position_au, &vector::scale(&delta, t)))
    }
}

impl Ephemeris for SampledEphemeris {
    fn heliocentric(&self, body: &str, jd: f64) -> Result<HeliocentricCoordinates, EphemerisError> {
        Ok(self.interpolate(body, jd)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "body,jd,x_au,y_au,z_au
earth, 2451545.0, 1.0, 0.0, 0.0
earth, 2451547.0, 0.0, 1.0, 0.0
EARTH, 2451546.0, 0.5, 0.5, 0.0
mars, 2451545.0, 1.5, 0.0, 0.1
";

    #[test]
    fn interpolates_between_sorted_samples() {
        let eph = SampledEphemeris::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(eph.span("Earth"), Some((2_451_545.0, 2_451_547.0)));
        let p = eph.position("earth", 2_451_546.5).unwrap();
        assert!((p[0] - 0.25).abs() < 1e-12 && (p[1] - 0.75).abs() < 1e-12, "{p:?}");
        assert_eq!(eph.position("EARTH", 2_451_547.0).unwrap(), [0.0, 1.0, 0.0]);
        assert_eq!(eph.position("earth", 2_451_545.0).unwrap(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn single_sample_is_valid_only_at_its_epoch() {
        let eph = SampledEphemeris::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(eph.position("mars", 2_451_545.0).unwrap(), [1.5, 0.0, 0.1]);
        assert!(matches!(
            eph.position("mars", 2_451_545.5),
            Err(EphemerisError::OutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_and_out_of_range_queries_fail() {
        let eph = SampledEphemeris::from_reader(CSV.as_bytes()).unwrap();
        assert!(matches!(
            eph.position("venus", 2_451_545.0),
            Err(EphemerisError::UnknownBody(_))
        ));
        assert!(matches!(
            eph.position("earth", 2_451_600.0),
            Err(EphemerisError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_malformed_rows() {
        let bad = "body,jd,x_au,y_au,z_au\nearth,2451545.0,abc,0,0\n";
        assert!(matches!(
            SampledEphemeris::from_reader(bad.as_bytes()),
            Err(EphemerisError::Csv(_))
        ));
        let nan = "body,jd,x_au,y_au,z_au\nearth,2451545.0,NaN,0,0\n";
        assert!(matches!(
            SampledEphemeris::from_reader(nan.as_bytes()),
            Err(EphemerisError::InvalidSample { record: 1, .. })
        ));
    }

    #[test]
    fn programmatic_insert_merges_tracks() {
        let mut eph = SampledEphemeris::new();
        eph.insert(
            "Moon",
            [
                Sample { jd: 10.0, position_au: [0.0, 0.0, 0.0] },
                Sample { jd: 0.0, position_au: [1.0, 1.0, 1.0] },
            ],
        );
        let p = eph.position("MOON", 5.0).unwrap();
        assert_eq!(p, [0.5, 0.5, 0.5]);
    }
}
