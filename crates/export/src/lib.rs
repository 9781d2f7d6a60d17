//! Export helpers for CSV, JSON and PNG artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub mod plot;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod polyline {
    use std::io::{self, Write};

    use orrery_core::vector::Vector3;
    use serde::Serialize;

    pub use super::writer_for_path;

    const HEADER: &str = "index,x,y,z";

    /// Write the polyline CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write one CSV row per vertex, in loop order.
    pub fn write_points(writer: &mut dyn Write, points: &[Vector3]) -> io::Result<()> {
        for (index, p) in points.iter().enumerate() {
            writeln!(writer, "{},{:.9},{:.9},{:.9}", index, p[0], p[1], p[2])?;
        }
        Ok(())
    }

    #[derive(Serialize)]
    struct PolylineDocument<'a> {
        body: &'a str,
        closed: bool,
        points: &'a [Vector3],
    }

    /// Pretty JSON document `{ body, closed, points }`.
    pub fn write_json(writer: &mut dyn Write, body: &str, points: &[Vector3]) -> io::Result<()> {
        let document = PolylineDocument {
            body,
            closed: true,
            points,
        };
        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)
    }
}

pub mod snapshot {
    use std::io::{self, Write};
    use std::path::Path;

    use orrery_core::vector::Vector3;
    use serde::Serialize;

    /// State of every body at one epoch, in scene units.
    #[derive(Debug, Clone, Serialize)]
    pub struct Snapshot {
        pub epoch_jd: f64,
        pub epoch_utc: String,
        pub au_scale: f64,
        pub bodies: Vec<BodySnapshot>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct BodySnapshot {
        pub name: String,
        pub kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parent: Option<String>,
        pub position: Vector3,
        pub display_radius: f64,
        /// Distance from the Sun in AU.
        pub heliocentric_distance_au: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tail: Option<TailSnapshot>,
    }

    #[derive(Debug, Clone, Copy, Serialize)]
    pub struct TailSnapshot {
        pub direction: Vector3,
        pub length: f64,
    }

    /// Write the snapshot as pretty JSON to `path` (`-` for stdout).
    pub fn write_json(path: &Path, snapshot: &Snapshot) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn polyline_csv_has_header_and_indexed_rows() {
        let mut buffer = Vec::new();
        polyline::write_header(&mut buffer).unwrap();
        polyline::write_points(&mut buffer, &[[1.0, 0.0, 0.0], [0.0, -1.5, 0.25]]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "index,x,y,z");
        assert_eq!(lines[1], "0,1.000000000,0.000000000,0.000000000");
        assert_eq!(lines[2], "1,0.000000000,-1.500000000,0.250000000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn polyline_json_round_trips_through_serde_json() {
        let mut buffer = Vec::new();
        polyline::write_json(&mut buffer, "EARTH", &[[1.0, 2.0, 3.0]]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["body"], "EARTH");
        assert_eq!(value["closed"], true);
        assert_eq!(value["points"][0][2], 3.0);
    }

    #[test]
    fn snapshot_written_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/snap.json");
        let snapshot = snapshot::Snapshot {
            epoch_jd: 2_451_545.0,
            epoch_utc: "2000-01-01T12:00:00Z".to_string(),
            au_scale: 100.0,
            bodies: vec![snapshot::BodySnapshot {
                name: "SUN".to_string(),
                kind: "star".to_string(),
                parent: None,
                position: [0.0, 0.0, 0.0],
                display_radius: 8.0,
                heliocentric_distance_au: 0.0,
                tail: None,
            }],
        };
        snapshot::write_json(&path, &snapshot).unwrap();
        let mut text = String::new();
        File::open(&path).unwrap().read_to_string(&mut text).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["bodies"][0]["name"], "SUN");
        assert!(value["bodies"][0].get("parent").is_none());
        assert!(value["bodies"][0].get("tail").is_none());
    }
}
