use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};
use shared_types::config::ConfigError;
use std::fs;
use std::path::Path;

/// Parses raw file bytes as a JSON document.
///
/// Invalid UTF-8 is reported as a parse failure, like any other malformed
/// input.
///
/// # Errors
///
/// Returns the `serde_json` error describing why the bytes are not JSON.
pub(crate) fn parse_json(bytes: &[u8]) -> Result<Value, serde_json::Error> {
  serde_json::from_slice(bytes)
}

/// Serializes `document` as pretty-printed JSON (2-space indentation, no
/// trailing newline) and overwrites `path` with it.
///
/// # Errors
///
/// - Serialization failure: `ConfigError::SerializeError`
/// - File write failure: `ConfigError::IoError`
pub(crate) fn write_pretty_json<P: AsRef<Path>>(
  path: P,
  document: &Map<String, Value>,
) -> Result<(), ConfigError> {
  let content =
    serde_json::to_string_pretty(document).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
  fs::write(path.as_ref(), content)?;
  Ok(())
}

/// Compiles a JSON Schema
///
/// # Panics
///
/// - Panics if the schema format is invalid
/// - Panics if schema compilation fails
pub(crate) fn compile_schema(schema_str: &str) -> JSONSchema {
  let schema: Value = serde_json::from_str(schema_str).expect("Schema is invalid");
  JSONSchema::options()
    .with_draft(Draft::Draft7)
    .compile(&schema)
    .expect("Failed to compile schema")
}
