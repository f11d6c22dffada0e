//! CLI argument definitions using clap
//!
//! Commands:
//! - salesdash serve --config <path> [--port <port>]
//! - salesdash query --config <path>
//! - salesdash explain --config <path>
//! - salesdash check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// salesdash - Sales transaction listing API
#[derive(Parser, Debug)]
#[command(name = "salesdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one listing query read as JSON from stdin and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },

    /// Show how a query read from stdin would be planned, without running it
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },

    /// Validate configuration and open the record source
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
