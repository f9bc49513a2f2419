//! CLI argument definitions using clap
//!
//! Commands:
//! - eventstore serve [--config <path>] [--host <host>] [--port <port>]
//! - eventstore query --events <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// eventstore - in-memory tagged event store with batched queries
#[derive(Parser, Debug)]
#[command(name = "eventstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load events from a file, run one query read from stdin, print the result
    Query {
        /// Path to a JSON file shaped like an ingest body: {"events": [...]}
        #[arg(long)]
        events: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["eventstore", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, host, port } => {
                assert!(config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_query_requires_events() {
        assert!(Cli::try_parse_from(["eventstore", "query"]).is_err());
        assert!(Cli::try_parse_from(["eventstore", "query", "--events", "e.json"]).is_ok());
    }
}
