use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use orrery::config::load_scene;
use orrery::ephem::{MeanElementsEphemeris, parse_epoch};
use orrery::export::snapshot::write_json;
use orrery::logging::init_logging;
use orrery::scene::SceneState;

#[path = "shared/catalog.rs"]
mod catalog;

/// Build the scene and dump every body's state as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scene snapshot exporter")]
struct Cli {
    /// Scene settings (TOML or YAML)
    #[arg(long, default_value = catalog::DEFAULT_SCENE)]
    scene: PathBuf,

    /// Body catalog (YAML list, TOML record or directory of TOML records)
    #[arg(long, default_value = catalog::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Epoch to evaluate; defaults to the scene clock's start epoch
    #[arg(long)]
    epoch: Option<String>,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let scene_config = load_scene(&cli.scene)
        .with_context(|| format!("failed to load scene {}", cli.scene.display()))?;
    let bodies = catalog::load_catalog(&cli.catalog)?;
    let mut scene = SceneState::build(&bodies, &scene_config, &MeanElementsEphemeris::new())?;
    if let Some(epoch) = &cli.epoch {
        scene.step(parse_epoch(epoch)?);
    }

    let snapshot = scene.snapshot()?;
    write_json(&cli.output, &snapshot)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(
        bodies = snapshot.bodies.len(),
        epoch = %snapshot.epoch_utc,
        "wrote snapshot"
    );
    Ok(())
}
