mod common;
mod settings;

pub use settings::{
  SETTINGS_FILE, SettingsSource, ensure_permissions, merge_settings, permissions_well_formed,
  read_settings, write_settings,
};
