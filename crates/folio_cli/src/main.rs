//! Folio CLI
//!
//! Run the portfolio's motion components headless and watch what they do to
//! the page.

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_platform::Viewport;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod fixture;
mod simulate;

use simulate::Simulation;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio motion simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels
    #[arg(long, global = true, default_value = "1440")]
    width: f32,

    /// Viewport height in CSS pixels
    #[arg(long, global = true, default_value = "900")]
    height: f32,

    /// Simulate `prefers-reduced-motion: reduce`
    #[arg(long, global = true)]
    reduced_motion: bool,

    /// Simulated frame rate
    #[arg(long, global = true, default_value = "60")]
    fps: f32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Toggle the hamburger menu and print the path morph
    Menu {
        /// Number of toggles, alternating open and closed
        #[arg(short, long, default_value = "2")]
        toggles: usize,

        /// Print every document mutation of each transition
        #[arg(short, long)]
        journal: bool,
    },

    /// Play the intro preloader
    Preload,

    /// Scroll down the page and print the reveal progress
    Scroll {
        /// Pixels per scroll step
        #[arg(short, long, default_value = "200")]
        step: f32,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let motion = config::load(cli.config.as_deref())?;
    let viewport = Viewport::new(cli.width, cli.height).reduced_motion(cli.reduced_motion);

    match cli.command {
        Commands::Menu { toggles, journal } => {
            let mut sim = Simulation::new(motion, viewport, cli.fps)?;
            cmd_menu(&mut sim, toggles, journal)
        }
        Commands::Preload => {
            let mut sim = Simulation::new(motion, viewport, cli.fps)?;
            sim.preload().map(|_| ())
        }
        Commands::Scroll { step } => {
            let mut sim = Simulation::new(motion, viewport, cli.fps)?;
            sim.scroll(step).map(|_| ())
        }
        Commands::Config => {
            print!("{}", config::to_toml(&motion)?);
            Ok(())
        }
    }
}

fn cmd_menu(sim: &mut Simulation, toggles: usize, journal: bool) -> Result<()> {
    let transitions = sim.menu(toggles, journal)?;
    let frames: u64 = transitions.iter().map(|t| t.frames).sum();
    let writes: usize = transitions.iter().map(|t| t.path.len()).sum();
    let state = match transitions.last() {
        Some(t) if t.open => "open",
        _ => "closed",
    };
    info!(
        "{} toggle(s), {} frames, {} path write(s), menu {}",
        transitions.len(),
        frames,
        writes,
        state
    );
    Ok(())
}
