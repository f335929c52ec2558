use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
  Command::new(env!("CARGO_BIN_EXE_skilled-spec"))
    .current_dir(dir)
    .env("NO_COLOR", "1")
    .env_remove("RUST_LOG")
    .output()
    .unwrap()
}

#[test]
fn test_installs_into_working_directory() {
  let target = tempfile::tempdir().unwrap();

  let output = run_in(target.path());
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(output.status.success(), "stdout: {stdout}");
  assert!(stdout.contains("安装完成"));
  assert!(target.path().join(".claude/skills").is_dir());
  assert!(
    fs::read_dir(target.path().join(".claude/skills"))
      .unwrap()
      .next()
      .is_some()
  );

  let settings: serde_json::Value = serde_json::from_str(
    &fs::read_to_string(target.path().join(".claude/settings.json")).unwrap(),
  )
  .unwrap();
  assert_eq!(
    settings,
    serde_json::json!({"permissions": {"allow": [], "deny": [], "ask": []}})
  );
}

#[test]
fn test_failure_exits_with_status_one() {
  let target = tempfile::tempdir().unwrap();
  fs::write(target.path().join(".claude"), "blocking file").unwrap();

  let output = run_in(target.path());
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(output.status.code(), Some(1));
  assert!(stdout.contains("安装失败"));
  assert!(stdout.contains(".claude"));
}
