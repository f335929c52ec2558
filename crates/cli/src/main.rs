mod console;

use console::Console;
use installer_core::{InstallReport, Installer};
use std::env;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
  installer_core::init_logger();

  let console = Console::new();
  console.banner();

  match install(&console) {
    Ok(report) => {
      console.summary(&report);
      ExitCode::SUCCESS
    }
    Err(e) => {
      console.failure(&e);
      ExitCode::FAILURE
    }
  }
}

/// Installs into the current working directory.
fn install(console: &Console) -> Result<InstallReport, Box<dyn Error>> {
  let target_dir = env::current_dir()?;
  let installer = Installer::builder(target_dir).build();
  Ok(installer.run(console)?)
}
