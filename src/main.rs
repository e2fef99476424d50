/*
 * Starfield
 *
 * An animated field of stars and dust flying toward the viewer while the
 * whole scene slowly rotates. Click the window to start the ambient track
 * and lock the pointer for look-around, press 'D' to toggle the detail
 * level, Escape to release the pointer and F3 for the debug panel.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, log_enabled, Level};

use starfield::{app, StarfieldParams};

#[derive(Parser, Debug)]
#[command(name = "starfield", about = "Animated starfield with pointer look-around")]
struct Cli {
    /// YAML file with starfield parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible field
    #[arg(long)]
    seed: Option<u64>,

    /// Number of stars
    #[arg(long)]
    stars: Option<usize>,

    /// Number of dust particles
    #[arg(long)]
    dust: Option<usize>,

    /// Do not start the ambient track
    #[arg(long)]
    no_audio: bool,

    /// Start in basic detail
    #[arg(long)]
    basic: bool,

    /// Show the debug panel
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => StarfieldParams::from_yaml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StarfieldParams::default(),
    };

    // Command line flags override the config file
    if let Some(seed) = cli.seed {
        params.seed = Some(seed);
    }
    if let Some(stars) = cli.stars {
        params.star_count = stars;
    }
    if let Some(dust) = cli.dust {
        params.dust_count = dust;
    }
    if cli.no_audio {
        params.audio.enabled = false;
    }
    if cli.basic {
        params.view.start_basic = true;
    }
    if cli.debug {
        params.view.show_debug = true;
    }

    params.validate().context("Invalid starfield parameters")?;
    if log_enabled!(Level::Debug) {
        let yaml = params.to_yaml_string().context("Failed to serialize starfield parameters")?;
        debug!("Effective parameters:\n{}", yaml);
    }
    info!("Starting with {} stars and {} dust particles", params.star_count, params.dust_count);

    app::launch(params);
    Ok(())
}
