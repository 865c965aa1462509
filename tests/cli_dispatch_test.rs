// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// 辅助函数，避免重复。HOME 指向临时目录，避免写入真实的配置文件
fn main_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"))
        .stdout(predicate::str::contains("--quality"));
}

#[test]
fn test_invalid_quality_rejected() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.args(["--url", "https://www.56.com/u37/v_1.html", "-q", "4k"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("4k"));
}

// --- 测试核心分发逻辑 ---

#[test]
fn test_single_url_mode_rejects_foreign_site() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.arg("--url").arg("https://example.com/watch?v=1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("链接必须以"));
}

#[test]
fn test_interactive_mode_exits_on_blank_input() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.write_stdin("\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("交互模式"))
        .stdout(predicate::str::contains("退出交互模式"));
}

#[test]
fn test_interactive_mode_rejects_invalid_link_and_continues() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.arg("-i").write_stdin("https://example.com/v.html\n\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("链接必须以"))
        .stdout(predicate::str::contains("退出交互模式"));
}

#[test]
fn test_default_config_file_is_created() {
    let home = tempdir().unwrap();
    let mut cmd = main_command(home.path());
    cmd.write_stdin("\n");
    cmd.assert().success();

    let config_path = home.path().join(".v56-dl").join("config.json");
    let content = std::fs::read_to_string(config_path).expect("配置文件应已创建");
    assert!(content.contains("https://www.56.com/"));
    assert!(content.contains("videonew.do"));
}
