// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates config environment behavior, edge cases, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use maresia::config::{LogLevel, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    env::remove_var("HTTP_PORT");
    env::remove_var("HISTORY_FILE");
    env::remove_var("RUST_LOG");
}

#[test]
#[serial]
fn test_defaults_with_empty_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.history.path, PathBuf::from("historico_atleta.json"));
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("HISTORY_FILE", "/tmp/history.json");
    env::set_var("RUST_LOG", "debug");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.history.path, PathBuf::from("/tmp/history.json"));
    assert_eq!(config.log_level, LogLevel::Debug);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_config_error() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, maresia::errors::ErrorCode::ConfigError);

    clear_env();
}

#[test]
fn test_log_level_fallback() {
    assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    assert_eq!(LogLevel::from_str_or_default("TRACE"), LogLevel::Trace);
}
