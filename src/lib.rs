// ABOUTME: Main library entry point for the Maresia training tracker
// ABOUTME: Provides the athlete record model, prognosis core, storage, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Maresia
//!
//! A small training tracker for a single athlete. Sea and gym sessions and
//! per-stage competition results are recorded through HTTP endpoints or an
//! interactive console menu, persisted to a flat JSON file, and fed to an
//! ordinary least squares regression that projects the athlete's next score
//! (the "Prognóstico").
//!
//! ## Architecture
//!
//! - **Models**: the athlete record and its mutation operations
//! - **Intelligence**: feature assembly, preprocessing transforms, and the
//!   regression model
//! - **Storage**: repository abstraction over the JSON history file
//! - **Routes**: HTTP surface for recording data and requesting a prognosis
//!
//! ## Example
//!
//! ```rust
//! use maresia::intelligence::features::build_training_data;
//! use maresia::intelligence::prognosis::PrognosisModel;
//! use maresia::models::AthleteRecord;
//!
//! # fn main() -> maresia::errors::AppResult<()> {
//! let mut record = AthleteRecord::new("Wesley Leite");
//! record.set_stage_result(1, 7.5, 3)?;
//! record.set_stage_result(2, 9.0, 1)?;
//!
//! let data = build_training_data(&record);
//! let model = PrognosisModel::fit(&data)?;
//! let next = model.predict_next(&record)?;
//! println!("Prognóstico: {next:.2}");
//! # Ok(())
//! # }
//! ```

/// Configuration management from environment variables
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Feature assembly, preprocessing transforms, and the prognosis model
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Common data models for the athlete record
pub mod models;

/// `HTTP` routes for session recording, stage results, and the prognosis
pub mod routes;

/// History repository abstraction over the JSON record file
pub mod storage;
