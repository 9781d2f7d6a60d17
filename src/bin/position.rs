use std::path::PathBuf;

use clap::{ArgAction, Parser};
use orrery::ephem::{
    Ephemeris, HeliocentricCoordinates, MeanElementsEphemeris, SampledEphemeris, format_epoch,
    parse_epoch,
};
use orrery::logging::init_logging;

#[path = "shared/catalog.rs"]
mod catalog;

/// Print a body's heliocentric ecliptic position at an epoch.
#[derive(Parser, Debug)]
#[command(author, version, about = "Heliocentric position of a body at an epoch")]
struct Cli {
    /// Body name (case-insensitive)
    #[arg(long)]
    body: String,

    /// Epoch: J2000, now, JD<number>, RFC 3339 or YYYY-MM-DD[ HH:MM[:SS]] (UTC)
    #[arg(long, default_value = "J2000")]
    epoch: String,

    /// Body catalog (YAML list, TOML record or directory of TOML records)
    #[arg(long, default_value = catalog::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Sampled ephemeris CSV (`body,jd,x_au,y_au,z_au`) used instead of orbital elements
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Multiply the position by this factor, e.g. scene units per AU
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let jd = parse_epoch(&cli.epoch)?;
    let position_au = match &cli.samples {
        Some(path) => SampledEphemeris::from_path(path)?.position(&cli.body, jd)?,
        None => {
            let bodies = catalog::load_catalog(&cli.catalog)?;
            let ephemeris = MeanElementsEphemeris::new();
            catalog::heliocentric_position(&bodies, &cli.body, &ephemeris, jd)?
        }
    };
    tracing::debug!(body = %cli.body, jd, "evaluated position");

    let (range_au, longitude, latitude) =
        HeliocentricCoordinates::from(position_au).range_longitude_latitude();

    println!("Body      : {}", cli.body.to_uppercase());
    println!("Epoch     : {} (JD {:.6})", format_epoch(jd)?, jd);
    println!(
        "Position  : x = {:.9}, y = {:.9}, z = {:.9}",
        position_au[0] * cli.scale,
        position_au[1] * cli.scale,
        position_au[2] * cli.scale
    );
    println!("Range     : r = {:.9} AU", range_au);
    println!(
        "Ecliptic  : lon = {:.6} deg, lat = {:.6} deg",
        longitude.to_degrees(),
        latitude.to_degrees()
    );
    Ok(())
}
