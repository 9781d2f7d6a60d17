use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::{ArgAction, Parser, ValueEnum};
use orrery::core::vector;
use orrery::ephem::{MeanElementsEphemeris, parse_epoch};
use orrery::export::{polyline, writer_for_path};
use orrery::logging::init_logging;
use orrery::orbits::Sampling;

#[path = "shared/catalog.rs"]
mod catalog;

/// Export the closed orbit loop of a body as CSV or JSON.
#[derive(Parser, Debug)]
#[command(author, version, about = "Orbit polyline exporter")]
struct Cli {
    /// Body name (case-insensitive)
    #[arg(long)]
    body: String,

    /// Number of vertices in the loop
    #[arg(long, default_value_t = 256)]
    segments: usize,

    /// Anomaly the vertices are spaced evenly in
    #[arg(long, value_enum, default_value_t = SamplingArg::Eccentric)]
    sampling: SamplingArg,

    /// Epoch used when the orbit comes from the mean-elements table
    #[arg(long, default_value = "J2000")]
    epoch: String,

    /// Body catalog (YAML list, TOML record or directory of TOML records)
    #[arg(long, default_value = catalog::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Multiply every vertex by this factor, e.g. scene units per AU
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum SamplingArg {
    True,
    Mean,
    Eccentric,
}

impl From<SamplingArg> for Sampling {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::True => Sampling::TrueAnomaly,
            SamplingArg::Mean => Sampling::MeanAnomaly,
            SamplingArg::Eccentric => Sampling::EccentricAnomaly,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if !(cli.scale.is_finite() && cli.scale > 0.0) {
        bail!("--scale must be positive (got {})", cli.scale);
    }
    let jd = parse_epoch(&cli.epoch)?;
    let bodies = catalog::load_catalog(&cli.catalog)?;
    let ephemeris = MeanElementsEphemeris::new();
    let orbit = catalog::resolve_orbit(&bodies, &cli.body, &ephemeris, jd)?;

    let points: Vec<_> = orbit
        .polyline(cli.segments, cli.sampling.into())
        .iter()
        .map(|p| vector::scale(p, cli.scale))
        .collect();
    tracing::debug!(body = %cli.body, vertices = points.len(), "sampled orbit");

    let mut writer = writer_for_path(&cli.output)?;
    match cli.format {
        Format::Csv => {
            polyline::write_header(&mut writer)?;
            polyline::write_points(&mut writer, &points)?;
        }
        Format::Json => polyline::write_json(&mut writer, &cli.body.to_uppercase(), &points)?,
    }
    writer.flush()?;

    if cli.output.as_os_str() != "-" {
        println!(
            "Wrote {} vertices for {} to {}",
            points.len(),
            cli.body.to_uppercase(),
            cli.output.display()
        );
    }
    Ok(())
}
