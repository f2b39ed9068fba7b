//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect recorded freehand strokes: simplify, smooth and classify them.
#[derive(Parser, Debug)]
#[command(name = "sketchsnap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a stroke
    Recognize {
        /// Stroke file
        stroke: PathBuf,
    },

    /// Simplify a stroke with RDP
    Simplify {
        /// Stroke file
        stroke: PathBuf,

        /// Tolerance in pixels (defaults to the config value)
        #[arg(short, long)]
        epsilon: Option<f64>,
    },

    /// Fit a smooth curve through a stroke
    Smooth {
        /// Stroke file
        stroke: PathBuf,

        /// Curve tension (defaults to the config value)
        #[arg(short, long)]
        tension: Option<f64>,

        /// Print an SVG path instead of JSON segments
        #[arg(long)]
        svg: bool,
    },

    /// Feed a stroke through a drawing session and print the committed result
    Replay {
        /// Stroke file
        stroke: PathBuf,
    },
}
