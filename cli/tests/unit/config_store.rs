//! `YamlConfigStore` against real files.
//!
//! These tests point `PODBRIDGE_CONFIG` at a temp file and are serialised
//! with `serial_test` because the variable is process-wide.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use podbridge_cli::application::ports::ConfigStore;
use podbridge_cli::application::services::config_service::{load_config, set_config_value};
use podbridge_cli::domain::PodbridgeConfig;
use podbridge_cli::infra::config::{CONFIG_ENV, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

fn with_config_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("config.yaml");
    // SAFETY: every test touching CONFIG_ENV is #[serial].
    unsafe { std::env::set_var(CONFIG_ENV, &path) };
    (dir, path)
}

#[test]
#[serial]
fn missing_file_loads_defaults() {
    let (_dir, path) = with_config_path();
    let store = YamlConfigStore;

    assert_eq!(store.path().unwrap(), path);
    assert_eq!(load_config(&store).unwrap(), PodbridgeConfig::default());
    assert!(!path.exists());
}

#[test]
#[serial]
fn set_creates_parent_dirs_and_persists() {
    let (_dir, path) = with_config_path();
    let store = YamlConfigStore;

    set_config_value(&store, "vm_name", "lima-podman").unwrap();
    set_config_value(&store, "sockets.rootless", "/run/user/501/podman/podman.sock").unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("vm_name: lima-podman"), "{written}");
    let loaded = load_config(&store).unwrap();
    assert_eq!(loaded.vm_name, "lima-podman");
    assert_eq!(loaded.sockets.rootless, "/run/user/501/podman/podman.sock");
    assert_eq!(loaded.sockets.rootful, "/run/podman/podman.sock");
}

#[cfg(unix)]
#[test]
#[serial]
fn saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = with_config_path();
    YamlConfigStore.save(&PodbridgeConfig::default()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
#[serial]
fn malformed_file_is_an_error_naming_the_path() {
    let (_dir, path) = with_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "vm_name: [unterminated").unwrap();

    let err = load_config(&YamlConfigStore).unwrap_err();
    assert!(
        format!("{err:#}").contains("config.yaml"),
        "{err:#}"
    );
}

#[test]
#[serial]
fn rejected_value_leaves_file_untouched() {
    let (_dir, path) = with_config_path();
    let store = YamlConfigStore;

    let err = set_config_value(&store, "repository.url", "ftp://mirror/").unwrap_err();

    assert!(err.to_string().contains("Invalid value"), "{err}");
    assert!(!path.exists());
}
