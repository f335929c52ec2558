use jsonschema::JSONSchema;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use shared_types::config::{
  ConfigError, PERMISSIONS_KEY, Permissions, SettingsOutcome, SettingsReport,
};
use std::fs;
use std::io;
use std::path::Path;

use crate::common::{compile_schema, parse_json, write_pretty_json};

pub const SETTINGS_FILE: &str = "settings.json";

static PERMISSIONS_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "allow": { "type": "array", "items": { "type": "string" } },
    "deny": { "type": "array", "items": { "type": "string" } },
    "ask": { "type": "array", "items": { "type": "string" } }
  }
}"#;

static COMPILED_PERMISSIONS_SCHEMA: Lazy<JSONSchema> =
  Lazy::new(|| compile_schema(PERMISSIONS_SCHEMA));

/// State of the settings file before a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
  /// No file at the settings path.
  Missing,
  /// The file holds a JSON object.
  Loaded(Map<String, Value>),
  /// The file exists but is not a JSON object. Carries the reason.
  Unparsable(String),
}

/// Reads the settings file at `path` without failing on bad content.
///
/// # Arguments
///
/// * `path` - Path to `settings.json`
///
/// # Returns
///
/// - `SettingsSource::Missing` if there is no file
/// - `SettingsSource::Loaded` if the file parses to a JSON object
/// - `SettingsSource::Unparsable` if the file is not valid JSON or its root
///   is not an object
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file exists but cannot be read.
pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<SettingsSource, ConfigError> {
  let path = path.as_ref();

  let bytes = match fs::read(path) {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsSource::Missing),
    Err(e) => return Err(e.into()),
  };

  match parse_json(&bytes) {
    Ok(Value::Object(document)) => Ok(SettingsSource::Loaded(document)),
    Ok(other) => Ok(SettingsSource::Unparsable(format!(
      "expected a JSON object, found {}",
      json_kind(&other)
    ))),
    Err(e) => Ok(SettingsSource::Unparsable(e.to_string())),
  }
}

/// Inserts the default permissions substructure if `document` has no
/// `permissions` key.
///
/// An existing `permissions` value is left exactly as it is, whatever its
/// shape. A newly inserted key lands after all existing keys.
///
/// # Returns
///
/// Returns `true` if the substructure was inserted.
///
/// # Errors
///
/// Returns `ConfigError::SerializeError` if the default value cannot be built.
pub fn ensure_permissions(document: &mut Map<String, Value>) -> Result<bool, ConfigError> {
  if document.contains_key(PERMISSIONS_KEY) {
    return Ok(false);
  }

  let permissions = serde_json::to_value(Permissions::default())
    .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
  document.insert(PERMISSIONS_KEY.to_string(), permissions);
  Ok(true)
}

/// Checks that a `permissions` value is an object whose `allow`, `deny` and
/// `ask` members, when present, are lists of strings.
#[must_use]
pub fn permissions_well_formed(value: &Value) -> bool {
  COMPILED_PERMISSIONS_SCHEMA.is_valid(value)
}

/// Writes `document` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// - Serialization failure: `ConfigError::SerializeError`
/// - File write failure: `ConfigError::IoError`
pub fn write_settings<P: AsRef<Path>>(
  path: P,
  document: &Map<String, Value>,
) -> Result<(), ConfigError> {
  write_pretty_json(path, document)
}

/// Makes sure the settings file at `path` carries a permissions substructure.
///
/// Reads the file if present, falls back to an empty document when it is
/// missing or cannot be used, adds the default permissions if absent, and
/// writes the result back. Every other key is preserved in its original
/// order.
///
/// # Arguments
///
/// * `path` - Path to `settings.json`
///
/// # Errors
///
/// - File read or write failure: `ConfigError::IoError`
/// - Serialization failure: `ConfigError::SerializeError`
pub fn merge_settings<P: AsRef<Path>>(path: P) -> Result<SettingsReport, ConfigError> {
  let path = path.as_ref();

  let (mut document, outcome) = match read_settings(path)? {
    SettingsSource::Missing => {
      info!("No settings at {}, creating one", path.display());
      (Map::new(), SettingsOutcome::Created)
    }
    SettingsSource::Loaded(document) => {
      debug!("Loaded {} settings keys from {}", document.len(), path.display());
      (document, SettingsOutcome::Updated)
    }
    SettingsSource::Unparsable(reason) => {
      warn!(
        "Cannot parse settings at {}, starting from an empty document: {}",
        path.display(),
        reason
      );
      (Map::new(), SettingsOutcome::Replaced)
    }
  };

  let permissions_added = ensure_permissions(&mut document)?;
  let permissions_well_formed = document
    .get(PERMISSIONS_KEY)
    .is_some_and(permissions_well_formed);

  if !permissions_well_formed {
    warn!(
      "Existing '{}' in {} is not a set of allow/deny/ask lists, leaving it unchanged",
      PERMISSIONS_KEY,
      path.display()
    );
  }

  write_settings(path, &document)?;
  info!("Wrote settings to {}", path.display());

  Ok(SettingsReport {
    outcome,
    permissions_added,
    permissions_well_formed,
  })
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
