use serde::Serialize;
use thiserror::Error;

/// Key of the permissions substructure inside the settings document.
pub const PERMISSIONS_KEY: &str = "permissions";

/// Rule lists the host tool uses to gate actions.
///
/// Only used to build the default substructure. An existing `permissions`
/// value in a settings document is never deserialized into this type, so
/// unknown members and odd shapes survive a rewrite untouched.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct Permissions {
  pub allow: Vec<String>,
  pub deny: Vec<String>,
  pub ask: Vec<String>,
}

/// What the settings merge did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
  /// No settings file existed; a new one was written.
  Created,
  /// The existing document was loaded and written back.
  Updated,
  /// The existing file could not be used as a settings document and was
  /// rewritten starting from an empty one.
  Replaced,
}

/// Summary of a settings merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsReport {
  pub outcome: SettingsOutcome,
  /// `true` when the default permissions substructure was inserted.
  pub permissions_added: bool,
  /// `false` when a pre-existing `permissions` value does not look like
  /// the allow / deny / ask rule lists. Such values are kept as they are.
  pub permissions_well_formed: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Settings serialization error: {0}")]
  SerializeError(String),

  #[error("File access error: {0}")]
  IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_permissions_serialize_to_three_empty_lists() {
    let value = serde_json::to_value(Permissions::default()).unwrap();
    assert_eq!(
      value,
      serde_json::json!({ "allow": [], "deny": [], "ask": [] })
    );
  }

  #[test]
  fn default_permissions_keep_field_order() {
    let text = serde_json::to_string(&Permissions::default()).unwrap();
    assert_eq!(text, r#"{"allow":[],"deny":[],"ask":[]}"#);
  }
}
