pub mod config;
pub mod install;
pub mod reporter;

pub use config::{ConfigError, PERMISSIONS_KEY, Permissions, SettingsOutcome, SettingsReport};
pub use install::{InstallError, InstallLayout, InstallReport};
pub use reporter::{InstallEvent, Reporter, SilentReporter};
