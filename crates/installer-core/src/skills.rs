use log::{debug, info};
use shared_types::{InstallError, InstallEvent, Reporter};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use utils::{copy_recursive, count_files};

/// Name of the skills directory shipped with the installer.
pub const BUNDLED_SKILLS_DIR: &str = "skills";

/// Top-level entries of the bundled skills directory after an install.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BundledSkills {
  pub installed: Vec<String>,
  pub skipped: Vec<String>,
  /// Regular files copied across all installed skills.
  pub files: usize,
}

/// Finds the skills directory shipped with the installer.
///
/// Looks in order at:
/// 1. `skills/` next to the executable
/// 2. `skills/` next to the executable's directory (a `bin/` + `skills/`
///    package layout)
/// 3. `skills/` at the root of the source tree the installer was built from
///
/// The first existing directory wins. If none exists, the first candidate is
/// returned so that the later read error names a sensible path.
#[must_use]
pub fn locate_bundled_skills() -> PathBuf {
  let mut candidates = Vec::new();

  if let Some(exe_dir) = env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(Path::to_path_buf))
  {
    candidates.push(exe_dir.join(BUNDLED_SKILLS_DIR));
    if let Some(package_root) = exe_dir.parent() {
      candidates.push(package_root.join(BUNDLED_SKILLS_DIR));
    }
  }

  candidates.push(
    Path::new(env!("CARGO_MANIFEST_DIR"))
      .join("..")
      .join("..")
      .join(BUNDLED_SKILLS_DIR),
  );

  first_existing_dir(candidates)
}

fn first_existing_dir(candidates: Vec<PathBuf>) -> PathBuf {
  let found = candidates.iter().position(|path| path.is_dir()).unwrap_or(0);
  debug!("Bundled skills candidates: {:?}", candidates);
  candidates.into_iter().nth(found).unwrap_or_default()
}

/// Copies every top-level directory of `source` into `dest`.
///
/// Entries are handled in name order. Non-directory entries are skipped
/// and no target entry is created for them. Links are followed, so a link
/// to a directory is installed as a skill.
///
/// # Arguments
///
/// * `source` - Bundled skills directory
/// * `dest` - Skills directory of the target project
/// * `reporter` - Receives one `SkillInstalled` event per copied skill
///
/// # Errors
///
/// * `InstallError::ReadSkills` - If `source` cannot be listed or an entry
///   cannot be inspected (including dangling links)
/// * `InstallError::CopySkill` - If copying a skill fails; skills copied
///   before it stay in place
pub fn install_bundled(
  source: &Path,
  dest: &Path,
  reporter: &dyn Reporter,
) -> Result<BundledSkills, InstallError> {
  let read_error = |source_err| InstallError::ReadSkills {
    path: source.to_path_buf(),
    source: source_err,
  };

  let mut entries = fs::read_dir(source)
    .map_err(read_error)?
    .collect::<Result<Vec<_>, _>>()
    .map_err(read_error)?;
  entries.sort_by_key(|entry| entry.file_name());

  let mut result = BundledSkills::default();

  for entry in entries {
    let name = entry.file_name().to_string_lossy().into_owned();
    let path = entry.path();

    let metadata = fs::metadata(&path).map_err(|source| InstallError::ReadSkills {
      path: path.clone(),
      source,
    })?;
    if !metadata.is_dir() {
      debug!("Skipping non-directory bundled entry '{}'", name);
      result.skipped.push(name);
      continue;
    }

    let copy_error = |source| InstallError::CopySkill {
      name: name.clone(),
      source,
    };
    let files = count_files(&path).map_err(copy_error)?;
    copy_recursive(&path, &dest.join(entry.file_name())).map_err(copy_error)?;
    info!("Installed skill '{}' ({} files)", name, files);
    reporter.report(InstallEvent::SkillInstalled { name: &name });
    result.files += files;
    result.installed.push(name);
  }

  Ok(result)
}
