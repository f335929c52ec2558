use std::fs;
use std::io;
use std::path::Path;

use log::{debug, trace};

/// Recursively copies `src` to `dst`, keeping the directory structure.
///
/// - A missing `src` is skipped silently and is not an error.
/// - A directory `src` creates `dst` (with any missing parents) and copies
///   every child into it.
/// - A file `src` has its bytes written to `dst`, overwriting an existing
///   file at that path.
///
/// Children are visited in the order the directory listing returns them.
///
/// # Arguments
///
/// * `src` - Source file or directory path
/// * `dst` - Destination path mirroring `src`
///
/// # Errors
///
/// Returns `io::Error` if reading the source, creating a directory or copying
/// a file fails. Anything copied before the failure stays in place.
pub fn copy_recursive(src: &Path, dst: &Path) -> io::Result<()> {
  let metadata = match fs::metadata(src) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!("Copy source {} does not exist, skipping", src.display());
      return Ok(());
    }
    Err(e) => return Err(e),
  };

  if metadata.is_dir() {
    if !dst.is_dir() {
      fs::create_dir_all(dst)?;
      trace!("Created directory {}", dst.display());
    }
    for entry in fs::read_dir(src)? {
      let entry = entry?;
      copy_recursive(&entry.path(), &dst.join(entry.file_name()))?;
    }
  } else {
    fs::copy(src, dst)?;
    trace!("Copied {} -> {}", src.display(), dst.display());
  }

  Ok(())
}

/// Counts regular files under `path`, following the same rules as
/// [`copy_recursive`]: a missing path counts as zero and a file counts as one.
///
/// # Errors
///
/// Returns `io::Error` if a directory in the subtree cannot be listed.
pub fn count_files(path: &Path) -> io::Result<usize> {
  let metadata = match fs::metadata(path) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
    Err(e) => return Err(e),
  };

  if !metadata.is_dir() {
    return Ok(1);
  }

  let mut total = 0;
  for entry in fs::read_dir(path)? {
    total += count_files(&entry?.path())?;
  }
  Ok(total)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  #[test_log::test]
  fn test_copy_nested_tree() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(&src.path().join("SKILL.md"), "# Skill");
    write(&src.path().join("templates/spec.md"), "spec body");
    write(&src.path().join("templates/deep/notes.txt"), "notes");

    let target = dst.path().join("skill");
    copy_recursive(src.path(), &target).unwrap();

    assert_eq!(
      fs::read_to_string(target.join("SKILL.md")).unwrap(),
      "# Skill"
    );
    assert_eq!(
      fs::read_to_string(target.join("templates/spec.md")).unwrap(),
      "spec body"
    );
    assert_eq!(
      fs::read_to_string(target.join("templates/deep/notes.txt")).unwrap(),
      "notes"
    );
  }

  #[test_log::test]
  fn test_copy_missing_source_is_noop() {
    let dst = tempdir().unwrap();
    let src = dst.path().join("does-not-exist");
    let target = dst.path().join("out");

    copy_recursive(&src, &target).unwrap();

    assert!(!target.exists());
  }

  #[test_log::test]
  fn test_copy_single_file_overwrites() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    let dst = dir.path().join("b.txt");
    fs::write(&src, "new").unwrap();
    fs::write(&dst, "old content that is longer").unwrap();

    copy_recursive(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
  }

  #[test_log::test]
  fn test_copy_into_existing_destination_keeps_extra_files() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(&src.path().join("SKILL.md"), "fresh");
    write(&dst.path().join("SKILL.md"), "stale");
    write(&dst.path().join("local.md"), "user file");

    copy_recursive(src.path(), dst.path()).unwrap();

    assert_eq!(
      fs::read_to_string(dst.path().join("SKILL.md")).unwrap(),
      "fresh"
    );
    assert_eq!(
      fs::read_to_string(dst.path().join("local.md")).unwrap(),
      "user file"
    );
  }

  #[test_log::test]
  fn test_copy_empty_directory() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::create_dir(src.path().join("empty")).unwrap();

    copy_recursive(src.path(), &dst.path().join("copy")).unwrap();

    assert!(dst.path().join("copy/empty").is_dir());
  }

  #[test]
  fn test_count_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), "1");
    write(&dir.path().join("sub/b"), "2");
    write(&dir.path().join("sub/deeper/c"), "3");
    fs::create_dir(dir.path().join("empty")).unwrap();

    assert_eq!(count_files(dir.path()).unwrap(), 3);
    assert_eq!(count_files(&dir.path().join("a")).unwrap(), 1);
    assert_eq!(count_files(&dir.path().join("missing")).unwrap(), 0);
  }
}
