use colored::{ColoredString, Colorize};
use installer_core::{InstallEvent, InstallReport, Reporter, SettingsOutcome};
use std::fmt::Display;
use std::path::Path;

const PROJECT_URL: &str = "https://github.com/forztf/skilled-spec-cn";

/// Color role of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  Bright,
  Info,
  Success,
  Warning,
  Error,
}

impl Tone {
  fn paint(self, text: &str) -> ColoredString {
    match self {
      Tone::Bright => text.bold(),
      Tone::Info => text.blue(),
      Tone::Success => text.green(),
      Tone::Warning => text.yellow(),
      Tone::Error => text.red(),
    }
  }
}

/// Terminal output of the installer.
#[derive(Debug, Default)]
pub struct Console;

impl Console {
  pub fn new() -> Self {
    Self
  }

  pub fn print(&self, tone: Tone, text: &str) {
    println!("{}", tone.paint(text));
  }

  pub fn banner(&self) {
    self.print(Tone::Bright, "\n🚀 正在为 Claude Code 安装 Skilled Spec...\n");
  }

  pub fn summary(&self, report: &InstallReport) {
    for (tone, text) in summary_lines(report) {
      self.print(tone, &text);
    }
  }

  pub fn failure(&self, error: &dyn Display) {
    self.print(Tone::Error, "\n❌ 安装失败：");
    self.print(Tone::Error, &format!("   {error}\n"));
  }
}

impl Reporter for Console {
  fn report(&self, event: InstallEvent<'_>) {
    let (tone, text) = describe(event);
    self.print(tone, &text);
  }
}

/// Console line for one progress event.
pub fn describe(event: InstallEvent<'_>) -> (Tone, String) {
  match event {
    InstallEvent::PreparingConfigDir { path } => (
      Tone::Info,
      format!("📁 正在创建 {} 目录...", dir_name(path)),
    ),
    InstallEvent::ConfigDirCreated { path } => {
      (Tone::Success, format!("   ✓ 已创建 {}/", dir_name(path)))
    }
    InstallEvent::ConfigDirExists { path } => (
      Tone::Success,
      format!("   ✓ {}/ 已存在", dir_name(path)),
    ),
    InstallEvent::InstallingSkills => (Tone::Info, "\n📦 正在安装技能...".to_string()),
    InstallEvent::SkillInstalled { name } => (Tone::Success, format!("   ✓ {name}")),
    InstallEvent::ConfiguringSettings { .. } => {
      (Tone::Info, "\n⚙️  正在配置设置...".to_string())
    }
    InstallEvent::SettingsWritten { outcome } => match outcome {
      SettingsOutcome::Created => (Tone::Success, "   ✓ 已创建 settings.json".to_string()),
      SettingsOutcome::Updated => (
        Tone::Success,
        "   ✓ 已更新现有 settings.json".to_string(),
      ),
      SettingsOutcome::Replaced => (
        Tone::Warning,
        "   ⚠ 无法解析现有 settings.json，将创建新的".to_string(),
      ),
    },
  }
}

/// Closing lines printed after a successful install.
pub fn summary_lines(report: &InstallReport) -> Vec<(Tone, String)> {
  let layout = &report.layout;
  let skills_path = layout
    .skills_dir
    .strip_prefix(&layout.target_dir)
    .unwrap_or(&layout.skills_dir);

  let mut lines = Vec::new();
  if !report.settings.permissions_well_formed {
    lines.push((
      Tone::Warning,
      "   ⚠ 现有 permissions 不是 allow/deny/ask 列表，已保持不变".to_string(),
    ));
  }
  lines.extend([
    (Tone::Bright, "\n✨ 安装完成！\n".to_string()),
    (Tone::Info, "技能安装位置：".to_string()),
    (Tone::Success, format!("   {}/\n", skills_path.display())),
    (Tone::Bright, "📚 后续步骤：".to_string()),
    (Tone::Info, "   1. 启动 Claude Code：claude".to_string()),
    (
      Tone::Info,
      "   2. 尝试：\"我想创建提案，添加用户认证\"".to_string(),
    ),
    (Tone::Info, "   3. 阅读：README 获取使用示例\n".to_string()),
    (Tone::Info, format!("🔗 了解更多：{PROJECT_URL}\n")),
  ]);
  lines
}

fn dir_name(path: &Path) -> String {
  path
    .file_name()
    .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
  use super::*;
  use installer_core::{InstallLayout, SettingsReport};
  use std::path::PathBuf;

  fn report(well_formed: bool) -> InstallReport {
    let target = PathBuf::from("/work/project");
    InstallReport {
      layout: InstallLayout {
        config_dir: target.join(".claude"),
        skills_dir: target.join(".claude/skills"),
        settings_file: target.join(".claude/settings.json"),
        target_dir: target,
      },
      installed: vec!["spec-proposal".to_string()],
      skipped: Vec::new(),
      files_copied: 3,
      settings: SettingsReport {
        outcome: SettingsOutcome::Updated,
        permissions_added: false,
        permissions_well_formed: well_formed,
      },
    }
  }

  #[test]
  fn test_describe_config_dir() {
    let path = Path::new("/work/project/.claude");
    assert_eq!(
      describe(InstallEvent::ConfigDirCreated { path }),
      (Tone::Success, "   ✓ 已创建 .claude/".to_string())
    );
    assert_eq!(
      describe(InstallEvent::ConfigDirExists { path }).1,
      "   ✓ .claude/ 已存在"
    );
  }

  #[test]
  fn test_describe_replaced_settings_is_a_warning() {
    let (tone, text) = describe(InstallEvent::SettingsWritten {
      outcome: SettingsOutcome::Replaced,
    });
    assert_eq!(tone, Tone::Warning);
    assert!(text.contains("settings.json"));
  }

  #[test]
  fn test_describe_skill_and_failure_lines() {
    assert_eq!(
      describe(InstallEvent::SkillInstalled {
        name: "spec-proposal"
      }),
      (Tone::Success, "   ✓ spec-proposal".to_string())
    );
    assert_eq!(
      describe(InstallEvent::InstallingSkills).1,
      "\n📦 正在安装技能..."
    );
  }

  #[test]
  fn test_summary_shows_relative_skills_path() {
    let lines = summary_lines(&report(true));
    assert!(lines.iter().any(|(_, text)| text == "   .claude/skills/\n"));
    assert!(lines.iter().any(|(_, text)| text == "\n✨ 安装完成！\n"));
    assert!(lines.iter().all(|(tone, _)| *tone != Tone::Warning));
  }

  #[test]
  fn test_summary_warns_about_malformed_permissions() {
    let lines = summary_lines(&report(false));
    assert_eq!(lines[0].0, Tone::Warning);
  }
}
