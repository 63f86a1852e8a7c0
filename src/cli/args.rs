//! CLI argument definitions using clap
//!
//! Commands:
//! - soulregistry init [--data-dir <path>]
//! - soulregistry serve [--port <port>] [--data-dir <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// soulregistry - a GraphQL registry of wielders and their zanpakuto
#[derive(Parser, Debug)]
#[command(name = "soulregistry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and an empty record log
    Init {
        /// Data directory (overrides SOULREGISTRY_DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Open the store and serve the GraphQL endpoint
    Serve {
        /// Listen port (overrides SOULREGISTRY_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Data directory (overrides SOULREGISTRY_DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
