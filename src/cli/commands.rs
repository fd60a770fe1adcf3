//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - add/edit/rename/remove/list: manage the content catalog
//! - link/unlink: manage separation pairs
//! - mode: toggle self or pairwise separation
//! - compute: sequence the catalog into a playlist
//! - graph: show the separation graph

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use playlistr::domain::ConstraintKind;

/// Playlistr - evenly spaced playlists with adjacency exclusions
#[derive(Parser, Debug)]
#[command(name = "playlistr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// State file holding the catalog (overrides config)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a content to the catalog
    Add {
        /// Content name (stored uppercased)
        name: String,

        /// Duration of one occurrence
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Number of occurrences required
        #[arg(short, long, default_value_t = 1)]
        saturation: u32,

        /// Display color (#RRGGBB), random when omitted
        #[arg(long)]
        color: Option<String>,
    },

    /// Change duration or saturation of a content
    Edit {
        name: String,

        #[arg(short, long)]
        duration: Option<f64>,

        #[arg(short, long)]
        saturation: Option<u32>,
    },

    /// Rename a content, keeping its attributes and links
    Rename { old: String, new: String },

    /// Remove a content and every link to it
    Remove { name: String },

    /// List the catalog
    List,

    /// Forbid two contents from being adjacent
    Link { a: String, b: String },

    /// Allow two contents to be adjacent again
    Unlink { a: String, b: String },

    /// Turn a separation mode on or off
    Mode { kind: ModeKind, switch: Switch },

    /// Compute a playlist from the catalog
    Compute {
        /// Shuffle seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum number of requeue passes
        #[arg(short, long)]
        budget: Option<u32>,

        /// Compute from a JSON content list instead of the stored catalog
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the separation graph
    Graph {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Separation mode selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Repeats of the same content
    #[value(name = "self")]
    SelfSeparation,
    /// Declared pairs of contents
    Pairwise,
}

impl From<ModeKind> for ConstraintKind {
    fn from(kind: ModeKind) -> Self {
        match kind {
            ModeKind::SelfSeparation => ConstraintKind::SelfSeparation,
            ModeKind::Pairwise => ConstraintKind::Pairwise,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(&self) -> bool {
        matches!(self, Switch::On)
    }
}
