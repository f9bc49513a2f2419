//! CLI command implementations
//!
//! `serve` resolves the server config and runs the HTTP server until the
//! process is stopped. `query` builds a private store from an events file,
//! answers one query and exits.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::api::{ApiError, ApiHandler};
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event, log_event_with_fields, LogEvent, MetricsRegistry};
use crate::store::EventStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => {
            let config = resolve_config(config.as_deref(), host, port)?;
            serve(config)
        }
        Command::Query { events } => query(&events),
    }
}

/// Build the server config: file (or defaults), then flag overrides
pub fn resolve_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        LogEvent::ConfigLoaded,
        &[("addr", &config.socket_addr()), ("source", &source)],
    );
    Ok(config)
}

/// Start the HTTP server and block until it exits
pub fn serve(config: ServerConfig) -> CliResult<()> {
    log_event(LogEvent::ServerStart);

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Load `events_path`, read one query from stdin, print the response to stdout
pub fn query(events_path: &Path) -> CliResult<()> {
    query_with(events_path, io::stdin().lock(), io::stdout().lock())
}

/// `query` over explicit streams.
///
/// A rejected ingest or query is written to `output` in the error shape
/// and also returned as `RequestFailed`.
pub fn query_with<R: Read, W: Write>(events_path: &Path, input: R, mut output: W) -> CliResult<()> {
    let events = fs::read_to_string(events_path).map_err(|e| {
        CliError::io_error(format!("cannot read {}: {}", events_path.display(), e))
    })?;

    let store = EventStore::new();
    let metrics = MetricsRegistry::new();
    let handler = ApiHandler::new(&store, &metrics);

    if let Err(err) = handler.ingest(&events) {
        return reject(&mut output, &err);
    }

    let body = read_request(input)?;
    match handler.query(&body) {
        Ok(response) => write_response(&mut output, &response),
        Err(err) => reject(&mut output, &err),
    }
}

fn reject<W: Write>(output: W, err: &ApiError) -> CliResult<()> {
    write_error(output, err)?;
    Err(CliError::request_failed(err))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn events_file(temp_dir: &TempDir, body: &Value) -> std::path::PathBuf {
        let path = temp_dir.path().join("events.json");
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    fn basic_events() -> Value {
        json!({"events": [
            {"tag": "tag1", "ts": 1001, "data": {"dim1": "foo", "dim2": "bar2"}},
            {"tag": "tag1", "ts": 1002, "data": {"dim1": "foo", "dim2": "bar2", "dim3": "oof"}}
        ]})
    }

    #[test]
    fn test_query_one_shot() {
        let temp_dir = TempDir::new().unwrap();
        let path = events_file(&temp_dir, &basic_events());
        let input = json!({"data": [{
            "name": "uniq",
            "tag": "tag1",
            "filters": [{"type": "eq", "key": "dim1", "value": "foo"}],
            "operations": [{"type": "uniqueCount", "key": "dim1"}],
            "hideData": true
        }]})
        .to_string();

        let mut out = Vec::new();
        query_with(&path, input.as_bytes(), &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            json!({"data": [{"name": "uniq", "meta": {"uniqueCount": 1}, "result": []}]})
        );
    }

    #[test]
    fn test_query_rejection_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = events_file(&temp_dir, &basic_events());
        let input = r#"{"data": [{"tag": "tag1", "filters": [{"type": "regex", "key": "dim1", "value": "("}]}]}"#;

        let mut out = Vec::new();
        let err = query_with(&path, input.as_bytes(), &mut out).unwrap_err();

        assert_eq!(err.code(), &CliErrorCode::RequestFailed);
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["code"], "EVENTSTORE_INVALID_PATTERN");
    }

    #[test]
    fn test_query_bad_events_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = events_file(&temp_dir, &json!({"events": [{"ts": 1}]}));

        let mut out = Vec::new();
        let err = query_with(&path, "{}".as_bytes(), &mut out).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::RequestFailed);

        let missing = temp_dir.path().join("missing.json");
        let err = query_with(&missing, "{}".as_bytes(), &mut out).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }

    #[test]
    fn test_resolve_config_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("eventstore.json");
        fs::write(&path, r#"{"host": "127.0.0.1", "port": 9000}"#).unwrap();

        let config = resolve_config(Some(&path), None, Some(9100)).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9100);

        let config = resolve_config(None, None, None).unwrap();
        assert_eq!(config, ServerConfig::default());

        let err = resolve_config(None, Some(String::new()), None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
