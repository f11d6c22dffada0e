//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Open the record source and start the HTTP server
//! - query: One-shot listing query
//! - explain: One-shot plan explanation (no data access)
//! - check: Validate configuration and source

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, explain, explain_request, open_source, query, run, run_command, serve};
pub use config::{Config, SourceConfig, DATABASE_URL_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
