//! CLI Module
//!
//! Command-line interface for the Roomcalc engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Roomcalc - room surface areas, material costs and 3D layout
#[derive(Parser, Debug)]
#[command(name = "roomcalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, global = true, env = "ROOMCALC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print areas, per-layer costs and the grand total
    #[command(name = "quote")]
    Quote {
        /// Room description (JSON)
        room: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print text size, grid extent and label placement
    #[command(name = "layout")]
    Layout {
        /// Room description (JSON)
        room: PathBuf,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate camera framing for a room size
    #[command(name = "fit")]
    Fit {
        /// Largest room dimension in meters
        #[arg(long)]
        max_dim: f64,

        /// Starting camera position as x,y,z
        #[arg(long, value_delimiter = ',', num_args = 3, default_values_t = [5.0, 5.0, 5.0])]
        camera: Vec<f64>,

        /// Maximum number of frames to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Frame time in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
    },

    /// Replay a command script against a room and print the result
    #[command(name = "run")]
    Run {
        /// Room description (JSON)
        room: PathBuf,

        /// Command script (JSON array)
        script: PathBuf,
    },

    /// Print the effective engine configuration
    #[command(name = "config")]
    Config,
}
