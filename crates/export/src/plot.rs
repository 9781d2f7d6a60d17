//! Top-down PNG rendering of orbit traces.
//!
//! No text is drawn, so the bitmap backend works without a font stack.

use std::path::Path;

use orrery_core::vector::Vector3;
use plotters::prelude::*;
use thiserror::Error;

const PALETTE: [RGBColor; 8] = [
    RGBColor(230, 159, 0),
    RGBColor(86, 180, 233),
    RGBColor(0, 158, 115),
    RGBColor(240, 228, 66),
    RGBColor(0, 114, 178),
    RGBColor(213, 94, 0),
    RGBColor(204, 121, 167),
    RGBColor(120, 120, 120),
];

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot")]
    Empty,
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("drawing failed: {0}")]
    Drawing(String),
}

/// How radial distance maps onto the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlotScale {
    #[default]
    Linear,
    /// `r -> sqrt(r)` keeps inner and outer planets on one canvas.
    Sqrt,
}

impl PlotScale {
    fn project(self, point: &Vector3) -> (f64, f64) {
        match self {
            PlotScale::Linear => (point[0], point[1]),
            PlotScale::Sqrt => {
                let r = point[0].hypot(point[1]);
                if r == 0.0 {
                    (0.0, 0.0)
                } else {
                    let k = r.sqrt() / r;
                    (point[0] * k, point[1] * k)
                }
            }
        }
    }
}

/// One body's closed orbit plus an optional current-position marker.
#[derive(Debug, Clone)]
pub struct OrbitTrace {
    pub name: String,
    pub points: Vec<Vector3>,
    pub marker: Option<Vector3>,
}

/// Render traces looking down the reference-frame +Z axis, Sun at the centre.
pub fn render_top_down(
    path: &Path,
    traces: &[OrbitTrace],
    size: (u32, u32),
    scale: PlotScale,
) -> Result<(), PlotError> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return Err(PlotError::InvalidSize { width, height });
    }
    let projected: Vec<Vec<(f64, f64)>> = traces
        .iter()
        .map(|trace| trace.points.iter().map(|p| scale.project(p)).collect())
        .collect();
    let markers: Vec<(f64, f64)> = traces
        .iter()
        .filter_map(|t| t.marker.as_ref())
        .map(|m| scale.project(m))
        .collect();
    let extent = projected
        .iter()
        .flatten()
        .chain(markers.iter())
        .map(|(x, y)| x.abs().max(y.abs()))
        .fold(0.0_f64, f64::max);
    if extent <= 0.0 || !extent.is_finite() {
        return Err(PlotError::Empty);
    }
    let half = extent * 1.05;
    let aspect = f64::from(width) / f64::from(height);
    let (half_x, half_y) = if aspect >= 1.0 {
        (half * aspect, half)
    } else {
        (half, half / aspect)
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&BLACK)
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-half_x..half_x, -half_y..half_y)
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let axis_style = ShapeStyle::from(&RGBColor(60, 60, 60)).stroke_width(1);
    chart
        .draw_series(
            [
                vec![(-half_x, 0.0), (half_x, 0.0)],
                vec![(0.0, -half_y), (0.0, half_y)],
            ]
            .into_iter()
            .map(|line| PathElement::new(line, axis_style)),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (0.0, 0.0),
            5,
            ShapeStyle::from(&YELLOW).filled(),
        )))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, (trace, points)) in traces.iter().zip(&projected).enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        if points.len() >= 2 {
            let mut closed = points.clone();
            closed.push(points[0]);
            chart
                .draw_series(std::iter::once(PathElement::new(
                    closed,
                    ShapeStyle::from(&color).stroke_width(1),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
        if let Some(marker) = &trace.marker {
            chart
                .draw_series(std::iter::once(Circle::new(
                    scale.project(marker),
                    3,
                    ShapeStyle::from(&color).filled(),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(radius: f64, n: usize) -> Vec<Vector3> {
        (0..n)
            .map(|k| {
                let t = std::f64::consts::TAU * k as f64 / n as f64;
                [radius * t.cos(), radius * t.sin(), 0.0]
            })
            .collect()
    }

    #[test]
    fn sqrt_scale_preserves_direction() {
        let (x, y) = PlotScale::Sqrt.project(&[4.0, 0.0, 7.0]);
        assert!((x - 2.0).abs() < 1e-12 && y.abs() < 1e-12);
        assert_eq!(PlotScale::Sqrt.project(&[0.0, 0.0, 1.0]), (0.0, 0.0));
        assert_eq!(PlotScale::Linear.project(&[1.0, -2.0, 3.0]), (1.0, -2.0));
    }

    #[test]
    fn renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots/orbits.png");
        let traces = vec![
            OrbitTrace {
                name: "EARTH".into(),
                points: circle(1.0, 64),
                marker: Some([1.0, 0.0, 0.0]),
            },
            OrbitTrace {
                name: "MARS".into(),
                points: circle(1.52, 64),
                marker: None,
            },
        ];
        render_top_down(&path, &traces, (200, 160), PlotScale::Sqrt).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn rejects_empty_input_and_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        assert!(matches!(
            render_top_down(&path, &[], (100, 100), PlotScale::Linear),
            Err(PlotError::Empty)
        ));
        let trace = OrbitTrace {
            name: "X".into(),
            points: circle(1.0, 8),
            marker: None,
        };
        assert!(matches!(
            render_top_down(&path, &[trace], (0, 100), PlotScale::Linear),
            Err(PlotError::InvalidSize { .. })
        ));
    }
}
