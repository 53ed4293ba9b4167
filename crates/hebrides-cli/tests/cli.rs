use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

// Runs the binary from an empty directory so no stray config file is picked up
fn run_hebrides(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hebrides"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("HEBRIDES_CONFIG")
        .env_remove("HEBRIDES_PRECISION")
        .env_remove("HEBRIDES_ANGLE_UNIT")
        .env_remove("RUST_LOG")
        .env("HOME", dir.path())
        .env("HEBRIDES_LOG_FORMAT", "off")
        .output()
        .expect("Failed to execute hebrides binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("eval"));
    assert!(text.contains("convert"));
    assert!(text.contains("--precision"));
}

#[test]
fn eval_prints_result() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["eval", "hypot", "3", "4"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5");

    let output = run_hebrides(&dir, &["--precision", "2", "eval", "sqrt_complex", "-4"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.00 + 2.00i");
}

#[test]
fn eval_domain_error_exits_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["eval", "asin", "2"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: asin: expected a value in [-1, 1] (got 2)"));
    assert!(stderr.contains("id: hebrides:domain:asin"));
}

#[test]
fn unknown_operation_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["eval", "frobnicate", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown operation"));
}

#[test]
fn convert_uses_target_unit() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["convert", "-90deg", "--to", "turns"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "-0.25 turn");
}

#[test]
fn list_filters_by_receiver() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["list", "--receiver", "angle"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.lines().all(|line| line.starts_with("Angle")));
    assert!(text.contains("normalized"));
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".hebrides.toml"),
        "[display]\nangle_unit = \"degrees\"\nprecision = 1\n",
    )
    .unwrap();
    let output = run_hebrides(&dir, &["eval", "arg", "0+1i"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "90.0°");

    let output = run_hebrides(&dir, &["config", "path"]);
    assert!(stdout(&output).contains(".hebrides.toml (exists)"));
}

#[test]
fn config_generate_writes_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("generated.toml");
    let output = run_hebrides(&dir, &["config", "generate", "--output", target.to_str().unwrap()]);
    assert!(output.status.success());
    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("tolerance"));

    let output = run_hebrides(&dir, &["--config", target.to_str().unwrap(), "config", "show"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("angle_unit = \"radians\""));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = run_hebrides(&dir, &["--precision", "99", "eval", "sqrt", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("display.precision"));
}
