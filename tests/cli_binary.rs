//! 빌드된 CLI 바이너리를 직접 실행해 표준 출력/오류와 종료 코드를 확인한다.
use std::process::{Command, Output, Stdio};

fn cli(config: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_emi_calculator_cli"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "info")
        .stdin(Stdio::null())
        .output()
        .expect("spawn cli")
}

#[test]
fn one_shot_stdout_carries_only_results() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let out = cli(
        &path,
        &["--lang", "en", "--principal", "120000", "--rate", "0", "--tenure", "1"],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Monthly EMI: ₹ 10,000.00");
    assert_eq!(lines[1], "Total Interest: ₹ 0.00");
    assert_eq!(lines[2], "Total Payment: ₹ 120,000.00");
    assert_eq!(lines.len(), 5);
    assert!(!stdout.contains("config"));
    let stderr = String::from_utf8(out.stderr).expect("utf8");
    assert!(stderr.contains("default config written"));
}

#[test]
fn partial_loan_flags_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let out = cli(&path, &["--principal", "1000000"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn interactive_menu_exits_on_closed_stdin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let out = cli(&path, &["--lang", "en"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf8");
    assert_eq!(stdout.matches("Select menu").count(), 1);
    assert!(!stdout.contains("Invalid selection"));
}
