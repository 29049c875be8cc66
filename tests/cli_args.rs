//! Tests for CLI argument parsing and startup failures, run against the
//! real binary.

mod common;

use common::temp_config;
use std::process::Command;

fn lntop_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lntop"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_options_and_subcommands() {
    let output = lntop_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("wallet-balance"));
    assert!(stdout.contains("pubsub"));
}

#[test]
fn test_version_flag() {
    let output = lntop_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_dir, path) = temp_config("[network]\ntype = \"eclair\"\n");
    let output = lntop_cmd()
        .arg("--config")
        .arg(&path)
        .arg("wallet-balance")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: loading configuration"));
    assert!(stderr.contains("eclair"));
}

#[test]
fn test_missing_certificate_exits_with_error() {
    let (dir, path) = temp_config("");
    let cert = dir.path().join("missing-tls.cert");
    let log = dir.path().join("lntop.log");
    std::fs::write(
        &path,
        format!(
            "[logger]\ntype = \"nope\"\ndest = \"{}\"\n\n[network]\ncert = \"{}\"\n",
            log.display(),
            cert.display()
        ),
    )
    .expect("write config");

    let output = lntop_cmd()
        .arg("-c")
        .arg(&path)
        .arg("wallet-balance")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("creating LND client"));
    assert!(stderr.contains("missing-tls.cert"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = lntop_cmd()
        .arg("open-channel")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
