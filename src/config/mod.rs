// ABOUTME: Configuration module organization for the Maresia tracker
// ABOUTME: Exposes environment-variable driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management

/// Environment-variable driven server configuration
pub mod environment;

pub use environment::{HistoryConfig, LogLevel, ServerConfig};
