use std::path::Path;

use crate::config::SettingsOutcome;

/// Progress of an install run, in the order the steps happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallEvent<'a> {
  /// About to make sure the configuration directory exists.
  PreparingConfigDir { path: &'a Path },
  /// Configuration directory was created by this run.
  ConfigDirCreated { path: &'a Path },
  /// Configuration directory was already there.
  ConfigDirExists { path: &'a Path },
  /// About to copy bundled skills.
  InstallingSkills,
  /// One skill directory was copied.
  SkillInstalled { name: &'a str },
  /// About to merge the settings file.
  ConfiguringSettings { path: &'a Path },
  /// Settings file was written.
  SettingsWritten { outcome: SettingsOutcome },
}

/// Receives install progress.
///
/// Keeps user-facing output out of the install logic. The CLI renders
/// events to the terminal, tests record them.
pub trait Reporter {
  fn report(&self, event: InstallEvent<'_>);
}

/// Reporter that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
  fn report(&self, _event: InstallEvent<'_>) {}
}
