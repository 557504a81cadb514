// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment overrides against the real process environment.

use relay_config::load_config_from_path;
use serial_test::serial;

fn config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
#[serial]
fn prefixed_number_overrides_file() {
    let (_dir, path) = config_file("[bridge]\nport = 9100\n");

    // SAFETY: test-only env mutation, serialized with #[serial].
    unsafe { std::env::set_var("RELAY_BRIDGE_DEFAULT_LIMIT", "50") };
    let result = load_config_from_path(&path);
    unsafe { std::env::remove_var("RELAY_BRIDGE_DEFAULT_LIMIT") };

    let config = result.unwrap();
    assert_eq!(config.bridge.port, 9100);
    assert_eq!(config.bridge.default_limit, 50);
}

#[test]
#[serial]
fn service_variables_override_file() {
    let (_dir, path) = config_file("[bridge]\nport = 9100\n\n[login]\ncode = \"11111\"\n");

    unsafe {
        std::env::set_var("TELEGRAM_BRIDGE_PORT", "9200");
        std::env::set_var("TELEGRAM_LOGIN_CODE", "00777");
    }
    let result = load_config_from_path(&path);
    unsafe {
        std::env::remove_var("TELEGRAM_BRIDGE_PORT");
        std::env::remove_var("TELEGRAM_LOGIN_CODE");
    }

    let config = result.unwrap();
    assert_eq!(config.bridge.port, 9200);
    assert_eq!(config.login.code.as_deref(), Some("00777"));
}

#[test]
#[serial]
fn unknown_prefixed_variable_is_ignored() {
    let (_dir, path) = config_file("");

    unsafe { std::env::set_var("RELAY_AGENT_NAME", "x") };
    let result = load_config_from_path(&path);
    unsafe { std::env::remove_var("RELAY_AGENT_NAME") };

    assert!(result.is_ok());
}
