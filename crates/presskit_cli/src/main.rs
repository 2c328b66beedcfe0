//! Presskit CLI
//!
//! Validate button scenes and replay scripted touches against them.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod replay;

use config::SceneConfig;
use replay::Replay;

#[derive(Parser)]
#[command(name = "presskit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Touch button scene tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scene's touch script and report emitted presses
    Replay {
        /// Scene file
        scene: PathBuf,

        /// Frame tick in milliseconds
        #[arg(short, long, default_value = "16")]
        tick: u64,
    },

    /// Validate a scene file
    Check {
        /// Scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay { scene, tick } => cmd_replay(&scene, tick),
        Commands::Check { scene } => cmd_check(&scene),
    }
}

fn load_checked(path: &Path) -> Result<SceneConfig> {
    let config = SceneConfig::load(path)?;
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            warn!("{}", problem);
        }
        bail!("{} problem(s) in {}", problems.len(), path.display());
    }
    Ok(config)
}

fn cmd_replay(path: &Path, tick_ms: u64) -> Result<()> {
    let config = load_checked(path)?;
    info!(
        "Replaying {} ({} buttons, {} steps)",
        path.display(),
        config.buttons.len(),
        config.steps.len()
    );

    let mut replay = Replay::new(&config, Duration::from_millis(tick_ms))?;
    let emitted = replay.run(&config)?;

    for press in &emitted {
        println!(
            "{:>8.3}s  {:<16} {}",
            press.at.as_secs_f32(),
            press.button,
            press.event
        );
    }
    info!("{} press(es) emitted", emitted.len());
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_checked(path)?;
    info!(
        "{} is valid: {} assets, {} buttons, {} steps",
        path.display(),
        config.assets.len(),
        config.buttons.len(),
        config.steps.len()
    );
    Ok(())
}
