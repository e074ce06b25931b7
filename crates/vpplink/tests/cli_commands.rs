#![cfg(all(unix, feature = "cli"))]

use std::path::PathBuf;
use std::process::Command;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/api")
}

fn vpplink() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vpplink"));
    cmd.arg("--log-level").arg("error");
    cmd
}

fn missing_socket() -> PathBuf {
    PathBuf::from(format!(
        "/tmp/vpplink-missing-{}-{}.sock",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

#[test]
fn check_against_api_dir_reports_satisfied() {
    let output = vpplink()
        .args(["--format", "json", "check", "interface", ">=3.1.0, <4.0.0"])
        .arg("--api-dir")
        .arg(fixtures())
        .output()
        .expect("check should run");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"found\":\"3.2.2\""), "{stdout}");
    assert!(stdout.contains("\"satisfied\":true"), "{stdout}");
}

#[test]
fn unsatisfied_check_exits_1() {
    let output = vpplink()
        .args(["--format", "pretty", "check", "ip", ">=4.0.0"])
        .arg("--api-dir")
        .arg(fixtures())
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unsatisfied"), "{stdout}");
}

#[test]
fn unknown_module_is_unsatisfied() {
    let output = vpplink()
        .args(["--format", "json", "check", "gtpu", ">=1.0.0"])
        .arg("--api-dir")
        .arg(fixtures())
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"found\":null"), "{stdout}");
}

#[test]
fn malformed_constraint_exits_64() {
    let output = vpplink()
        .args(["check", "interface", "~>3"])
        .arg("--api-dir")
        .arg(fixtures())
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn invalid_timeout_exits_64() {
    let output = vpplink()
        .args(["--timeout", "0s", "info"])
        .output()
        .expect("info should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout"), "{stderr}");
}

#[test]
fn missing_socket_exits_3() {
    let socket = missing_socket();
    let output = vpplink()
        .arg("--socket")
        .arg(&socket)
        .arg("interfaces")
        .output()
        .expect("interfaces should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&socket.display().to_string()), "{stderr}");
}

#[test]
fn socket_can_come_from_environment() {
    let socket = missing_socket();
    let output = vpplink()
        .env("VPP_API_SOCKET", &socket)
        .arg("routes")
        .output()
        .expect("routes should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&socket.display().to_string()), "{stderr}");
}

#[test]
fn version_prints_package_version() {
    let output = vpplink()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("vpplink {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn extended_version_names_binding_release() {
    let output = vpplink()
        .args(["version", "--extended"])
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("binapi: "), "{stdout}");
}
