pub mod skills;

use config::{SETTINGS_FILE, merge_settings};
use log::{debug, info};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub use shared_types::{
  ConfigError, InstallError, InstallEvent, InstallLayout, InstallReport, Reporter,
  SettingsOutcome, SettingsReport, SilentReporter,
};

/// Host tool configuration directory inside the target project.
pub const CONFIG_DIR: &str = ".claude";
/// Skills directory inside the configuration directory.
pub const SKILLS_DIR: &str = "skills";

static INIT: Once = Once::new();

/// Initializes `env_logger` once per process.
///
/// Diagnostics default to `warn` so they stay out of the way of the
/// installer's own progress output; set `RUST_LOG` to see more.
pub fn init_logger() {
  INIT.call_once(|| {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
      .format_timestamp_secs()
      .format_module_path(true)
      .format_target(false)
      .init();

    debug!("Debug level log is enabled");
  });
}

/// Installer builder.
///
/// Only the target directory is required. The bundled skills source defaults
/// to [`skills::locate_bundled_skills`] and the layout names default to
/// `.claude`, `skills` and `settings.json`.
///
/// # Examples
///
/// ```no_run
/// use installer_core::{Installer, SilentReporter};
///
/// let installer = Installer::builder(std::env::current_dir()?)
///   .skills_source("/opt/skilled-spec/skills")
///   .build();
/// let report = installer.run(&SilentReporter)?;
/// println!("installed {} skills", report.installed.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct InstallerBuilder {
  target_dir: PathBuf,
  skills_source: Option<PathBuf>,
  config_dir_name: String,
  skills_dir_name: String,
  settings_file_name: String,
}

impl InstallerBuilder {
  /// Create a new builder installing into `target_dir`.
  #[must_use]
  pub fn new(target_dir: impl Into<PathBuf>) -> Self {
    InstallerBuilder {
      target_dir: target_dir.into(),
      skills_source: None,
      config_dir_name: CONFIG_DIR.to_string(),
      skills_dir_name: SKILLS_DIR.to_string(),
      settings_file_name: SETTINGS_FILE.to_string(),
    }
  }

  /// Directory whose top-level subdirectories are the skills to install.
  #[must_use]
  pub fn skills_source(mut self, path: impl Into<PathBuf>) -> Self {
    self.skills_source = Some(path.into());
    self
  }

  #[must_use]
  pub fn config_dir_name(mut self, name: impl Into<String>) -> Self {
    self.config_dir_name = name.into();
    self
  }

  #[must_use]
  pub fn skills_dir_name(mut self, name: impl Into<String>) -> Self {
    self.skills_dir_name = name.into();
    self
  }

  #[must_use]
  pub fn settings_file_name(mut self, name: impl Into<String>) -> Self {
    self.settings_file_name = name.into();
    self
  }

  /// Build an [`Installer`], resolving the bundled skills directory if no
  /// source was given.
  #[must_use]
  pub fn build(self) -> Installer {
    let skills_source = self
      .skills_source
      .unwrap_or_else(skills::locate_bundled_skills);
    let config_dir = self.target_dir.join(&self.config_dir_name);

    Installer {
      skills_source,
      layout: InstallLayout {
        skills_dir: config_dir.join(&self.skills_dir_name),
        settings_file: config_dir.join(&self.settings_file_name),
        config_dir,
        target_dir: self.target_dir,
      },
    }
  }
}

/// Provisions bundled skills and the settings file into one target project.
#[derive(Debug, Clone)]
pub struct Installer {
  skills_source: PathBuf,
  layout: InstallLayout,
}

impl Installer {
  /// Create an installer builder for `target_dir` (recommended construction
  /// method).
  pub fn builder(target_dir: impl Into<PathBuf>) -> InstallerBuilder {
    InstallerBuilder::new(target_dir)
  }

  /// Run the install.
  ///
  /// Steps performed:
  /// 1. Create the configuration directory if missing
  /// 2. Create the skills directory if missing
  /// 3. Copy every bundled skill directory into the skills directory
  /// 4. Create or update the settings file so it has a permissions section
  ///
  /// Progress is sent to `reporter` as it happens. The first failure stops
  /// the run; skills copied before it are left in place.
  ///
  /// # Errors
  ///
  /// - `InstallError::CreateDir` - A target directory could not be created
  /// - `InstallError::ReadSkills` - The bundled skills directory or one of its
  ///   entries could not be read
  /// - `InstallError::CopySkill` - Copying a skill failed
  /// - `InstallError::Settings` - The settings file could not be read or written
  pub fn run(&self, reporter: &dyn Reporter) -> Result<InstallReport, InstallError> {
    let layout = &self.layout;
    info!(
      "Installing skills from {} into {}",
      self.skills_source.display(),
      layout.target_dir.display()
    );

    reporter.report(InstallEvent::PreparingConfigDir {
      path: &layout.config_dir,
    });
    if ensure_dir(&layout.config_dir)? {
      reporter.report(InstallEvent::ConfigDirCreated {
        path: &layout.config_dir,
      });
    } else {
      reporter.report(InstallEvent::ConfigDirExists {
        path: &layout.config_dir,
      });
    }

    ensure_dir(&layout.skills_dir)?;

    reporter.report(InstallEvent::InstallingSkills);
    let bundled = skills::install_bundled(&self.skills_source, &layout.skills_dir, reporter)?;

    reporter.report(InstallEvent::ConfiguringSettings {
      path: &layout.settings_file,
    });
    let settings = merge_settings(&layout.settings_file)?;
    reporter.report(InstallEvent::SettingsWritten {
      outcome: settings.outcome,
    });

    info!(
      "Installed {} skills, {} files ({} entries skipped)",
      bundled.installed.len(),
      bundled.files,
      bundled.skipped.len()
    );

    Ok(InstallReport {
      layout: layout.clone(),
      installed: bundled.installed,
      skipped: bundled.skipped,
      files_copied: bundled.files,
      settings,
    })
  }
}

/// Creates `path` and its parents if it is not already a directory.
///
/// Returns `true` if the directory was created by this call.
fn ensure_dir(path: &Path) -> Result<bool, InstallError> {
  if path.is_dir() {
    return Ok(false);
  }

  create_dir_all(path).map_err(|source| InstallError::CreateDir {
    path: path.to_path_buf(),
    source,
  })?;
  debug!("Created {}", path.display());
  Ok(true)
}
