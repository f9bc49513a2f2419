//! CLI module for eventstore
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP server
//! - query: One-shot query over an events file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{query, query_with, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
