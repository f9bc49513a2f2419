//! JSON I/O handling for CLI
//!
//! - Input: one JSON document, read to end of input
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::{Read, Write};

use serde::Serialize;

use crate::api::{ApiError, ErrorResponse};

use super::errors::{CliError, CliResult};

/// Read one JSON request body
pub fn read_request<R: Read>(mut reader: R) -> CliResult<String> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;

    if body.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(body)
}

/// Write a serializable response as one line
pub fn write_response<W: Write, T: Serialize>(mut writer: W, response: &T) -> CliResult<()> {
    serde_json::to_writer(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write an API error in the same shape the HTTP transport uses
pub fn write_error<W: Write>(writer: W, err: &ApiError) -> CliResult<()> {
    write_response(writer, &ErrorResponse::from_error(err))
}
