// ABOUTME: Intelligence module organization for the prognosis core
// ABOUTME: Groups feature assembly, preprocessing transforms, and the regression model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prognosis intelligence
//!
//! The core pipeline is deliberately small: `features` turns the athlete
//! record into a standardized matrix and target vector, `prognosis` fits an
//! ordinary least squares model on them and projects the next score. The
//! transforms fitted during feature assembly travel with the model so a
//! prediction row is never pushed through freshly fitted ones.

/// Feature matrix assembly from the athlete record
pub mod features;

/// Standardization and one-hot encoding transforms
pub mod preprocessing;

/// Ordinary least squares prognosis model
pub mod prognosis;

pub use features::{build_training_data, FeatureRow, FeatureTransform, TrainingData};
pub use preprocessing::{OneHotEncoder, StandardScaler};
pub use prognosis::{format_prognosis, PrognosisEngine, PrognosisModel};
