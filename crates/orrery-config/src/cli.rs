//! Command-line argument parsing for the orrery simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Hierarchical orbit simulator")]
pub struct CliArgs {
    /// Run exactly this many simulation ticks, then exit.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Run the wall-clock frame loop for this many seconds, then exit.
    #[arg(long)]
    pub seconds: Option<f64>,

    /// Start with integration paused.
    #[arg(long)]
    pub paused: Option<bool>,

    /// Starfield scatter seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of backdrop stars to scatter.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(paused) = args.paused {
            self.simulation.start_paused = paused;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = seed;
        }
        if let Some(stars) = args.stars {
            self.starfield.star_count = stars;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
