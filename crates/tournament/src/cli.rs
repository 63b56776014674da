//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tourney_core::RoundCount;

use crate::config::{AppConfig, CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(name = "tournament", version, about = "Run a multi-round pairing tournament")]
pub struct Cli {
    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding saved tournaments (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Seed for the pairing tie-break (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a tournament from the player registry and start playing it
    New {
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        description: String,

        /// round-robin, swiss, or a fixed number of rounds
        #[arg(long)]
        rounds: Option<RoundCount>,

        /// Registry ids to enroll (default: everyone in the registry)
        #[arg(long, num_args = 1..)]
        players: Vec<String>,

        /// Player registry file (overrides the config file)
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Continue a saved tournament
    Resume { name: String },
    /// List saved tournaments
    List,
    /// List registered players alphabetically
    Players {
        /// Player registry file (overrides the config file)
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Print the full report of a saved tournament
    Report { name: String },
}

impl Cli {
    /// Apply the global flags on top of the file configuration.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}
