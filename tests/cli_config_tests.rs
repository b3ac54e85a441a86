//! End-to-end tests for `shelf-designer config`.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the shelf-designer binary
fn shelf_designer_bin() -> String {
    std::env::var("CARGO_BIN_EXE_shelf-designer")
        .unwrap_or_else(|_| "target/release/shelf-designer".to_string())
}

/// Creates a Command with isolated config directory for testing.
fn isolated_config_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(shelf_designer_bin());
    cmd.env("SHELF_DESIGNER_CONFIG_DIR", config_dir);
    cmd.args(args);
    cmd
}

// ============================================================================
// Show Tests
// ============================================================================

#[test]
fn test_config_show_defaults_as_toml() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[defaults]"));
    assert!(stdout.contains("material = \"pine\""));
    assert!(stdout.contains("port = 3001"));
}

#[test]
fn test_config_show_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["defaults"]["module_width"], 80.0);
    assert_eq!(json["interaction"]["double_click_window_ms"], 200);
}

#[test]
fn test_config_reads_overrides_from_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[defaults]\nmaterial = \"mdf\"\nboard_thickness = 15.0\n",
    )
    .unwrap();

    let output = isolated_config_command(&["config", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["defaults"]["material"], "mdf");
    assert_eq!(json["defaults"]["board_thickness"], 15.0);
    assert_eq!(json["defaults"]["module_height"], 180.0);
}

#[test]
fn test_config_invalid_file_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[defaults]\nmaterial = \"balsa\"\n",
    )
    .unwrap();

    let output = isolated_config_command(&["config"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("balsa"));
}

// ============================================================================
// Path Tests
// ============================================================================

#[test]
fn test_config_path_honors_override() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "--path"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = temp_dir.path().join("config.toml");
    assert_eq!(stdout.trim(), expected.display().to_string());
}

#[test]
fn test_new_uses_configured_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[defaults]\nmodule_width = 100.0\nmaterial = \"plywood\"\n",
    )
    .unwrap();

    let output = isolated_config_command(&["new"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["template"]["modules"][0]["size"]["width"], 100.0);
    assert_eq!(doc["settings"]["material"], "plywood");
}
