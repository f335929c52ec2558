use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, SettingsReport};

#[derive(Error, Debug)]
pub enum InstallError {
  #[error("Failed to create directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to read bundled skills at {}: {source}", path.display())]
  ReadSkills {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to copy skill '{name}': {source}")]
  CopySkill {
    name: String,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Settings(#[from] ConfigError),
}

/// Paths touched by an install run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
  pub target_dir: PathBuf,
  pub config_dir: PathBuf,
  pub skills_dir: PathBuf,
  pub settings_file: PathBuf,
}

/// Result of a successful install run.
#[derive(Debug, Clone)]
pub struct InstallReport {
  pub layout: InstallLayout,
  /// Skill directory names copied into the skills directory, in listing order.
  pub installed: Vec<String>,
  /// Top-level bundled entries that are not directories and were left out.
  pub skipped: Vec<String>,
  /// Regular files copied across all installed skills.
  pub files_copied: usize,
  pub settings: SettingsReport,
}
