use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use orrery::ephem::{MeanElementsEphemeris, parse_epoch};
use orrery::export::plot::{OrbitTrace, PlotScale, render_top_down};
use orrery::logging::init_logging;
use orrery::orbits::Sampling;

#[path = "shared/catalog.rs"]
mod catalog;

/// Render every heliocentric orbit in the catalog as seen from ecliptic north.
#[derive(Parser, Debug)]
#[command(author, version, about = "Top-down orbit plot (PNG)")]
struct Cli {
    /// Body catalog (YAML list, TOML record or directory of TOML records)
    #[arg(long, default_value = catalog::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Epoch for the body markers
    #[arg(long, default_value = "J2000")]
    epoch: String,

    #[arg(long, default_value = "artifacts/orbits.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 1000)]
    height: u32,

    /// Vertices per orbit
    #[arg(long, default_value_t = 360)]
    segments: usize,

    /// Radial mapping; `sqrt` keeps the inner planets readable next to Neptune
    #[arg(long, value_enum, default_value_t = ScaleArg::Sqrt)]
    scale: ScaleArg,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ScaleArg {
    Linear,
    Sqrt,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let jd = parse_epoch(&cli.epoch)?;
    let bodies = catalog::load_catalog(&cli.catalog)?;
    let ephemeris = MeanElementsEphemeris::new();

    let mut traces = Vec::new();
    for body in bodies.iter().filter(|b| b.is_heliocentric()) {
        let Some(orbit) = body.orbit(&ephemeris)? else {
            continue;
        };
        traces.push(OrbitTrace {
            name: body.name.clone(),
            points: orbit.polyline(cli.segments, Sampling::EccentricAnomaly),
            marker: Some(orbit.position_at(jd)),
        });
    }
    tracing::debug!(orbits = traces.len(), "collected traces");

    let scale = match cli.scale {
        ScaleArg::Linear => PlotScale::Linear,
        ScaleArg::Sqrt => PlotScale::Sqrt,
    };
    render_top_down(&cli.output, &traces, (cli.width, cli.height), scale)?;
    println!(
        "Wrote {} orbits to {}",
        traces.len(),
        cli.output.display()
    );
    Ok(())
}
