// ABOUTME: Feature matrix assembly from the athlete record for the prognosis model
// ABOUTME: Emits one row per completed stage plus the fitted transforms for later predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature assembly
//!
//! One training row per stage with a recorded score:
//!
//! `[placement, sea-session count, gym-session count, sea quality, gym
//! quality, ...one-hot extra-variable columns]`
//!
//! Session counts are record totals, not per-stage counts. The five numeric
//! columns are standardized; the one-hot columns are left unscaled. The
//! fitted scaler and encoder are returned with the matrix and must be the
//! ones applied to every later prediction row.

use crate::errors::AppResult;
use crate::intelligence::preprocessing::{OneHotEncoder, StandardScaler};
use crate::models::AthleteRecord;
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;

/// Count of numeric (standardized) columns ahead of the one-hot block
pub const NUMERIC_FEATURES: usize = 5;

/// A raw, untransformed feature row
///
/// The numeric part and the categorical part are kept separate until the
/// fitted [`FeatureTransform`] turns them into a model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// `[placement, sea count, gym count, sea quality, gym quality]`
    pub numeric: [f64; NUMERIC_FEATURES],
    /// Extra-variable values, keyed by variable name
    pub extras: BTreeMap<String, String>,
    /// Impact weight per extra variable
    pub impacts: BTreeMap<String, u8>,
}

impl FeatureRow {
    /// Build a row from explicit numeric features with no extra variables
    #[must_use]
    pub fn from_numeric(numeric: [f64; NUMERIC_FEATURES]) -> Self {
        Self {
            numeric,
            extras: BTreeMap::new(),
            impacts: BTreeMap::new(),
        }
    }

    /// Build the current prediction row from the record
    ///
    /// Uses the latest placement slot (0 when unset), total session counts,
    /// and the persisted quality flags, mirroring the training rows.
    #[must_use]
    pub fn from_record(record: &AthleteRecord) -> Self {
        Self {
            numeric: [
                f64::from(record.latest_placement()),
                record.sea_session_count() as f64,
                record.gym_session_count() as f64,
                f64::from(record.sea_quality),
                f64::from(record.gym_quality),
            ],
            extras: record.extra_variables.clone(),
            impacts: record.extra_impacts.clone(),
        }
    }
}

/// The transforms fitted during feature assembly
///
/// Held alongside the model after fitting so prediction rows go through the
/// same scaler and encoder as the training matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTransform {
    scaler: StandardScaler,
    encoder: OneHotEncoder,
}

impl FeatureTransform {
    /// Total model input width (numeric plus one-hot columns)
    #[must_use]
    pub fn width(&self) -> usize {
        NUMERIC_FEATURES + self.encoder.width()
    }

    /// Turn a raw row into a model input vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the numeric block width does not match the
    /// fitted scaler
    pub fn apply(&self, row: &FeatureRow) -> AppResult<Array1<f64>> {
        let scaled = self
            .scaler
            .transform_row(&Array1::from(row.numeric.to_vec()))?;
        let encoded = self.encoder.encode(&row.extras, &row.impacts);

        let mut input = scaled.to_vec();
        input.extend(encoded);
        Ok(Array1::from(input))
    }
}

/// Assembled training data for the prognosis model
#[derive(Debug, Clone)]
pub struct TrainingData {
    /// Raw rows before standardization, one per completed stage
    pub raw_matrix: Array2<f64>,
    /// Model input matrix: standardized numeric block plus one-hot block
    pub matrix: Array2<f64>,
    /// Known stage scores, parallel to the rows
    pub targets: Array1<f64>,
    /// Transforms fitted on this data; `None` when there are no rows
    pub transform: Option<FeatureTransform>,
}

impl TrainingData {
    /// Number of training rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the record produced no usable rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Build the training matrix and target vector from the athlete record
///
/// A row is emitted for every stage with a recorded score, with the placement
/// defaulting to 0 when its slot is unset. Zero completed stages yield empty
/// outputs and no fitted transform.
#[must_use]
pub fn build_training_data(record: &AthleteRecord) -> TrainingData {
    let encoder = OneHotEncoder::fit(&record.extra_variables);
    let encoded = encoder.encode(&record.extra_variables, &record.extra_impacts);
    let width = NUMERIC_FEATURES + encoder.width();

    let mut raw_rows: Vec<f64> = Vec::new();
    let mut targets: Vec<f64> = Vec::new();

    for (i, score) in record.stage_scores.iter().enumerate() {
        let Some(score) = score else { continue };
        let placement = record.stage_placements[i].unwrap_or(0);

        raw_rows.extend_from_slice(&[
            f64::from(placement),
            record.sea_session_count() as f64,
            record.gym_session_count() as f64,
            f64::from(record.sea_quality),
            f64::from(record.gym_quality),
        ]);
        raw_rows.extend_from_slice(&encoded);
        targets.push(*score);
    }

    let rows = targets.len();
    let raw_matrix = Array2::from_shape_vec((rows, width), raw_rows)
        .unwrap_or_else(|_| Array2::zeros((0, width)));
    let targets = Array1::from(targets);

    if rows == 0 {
        return TrainingData {
            raw_matrix,
            matrix: Array2::zeros((0, width)),
            targets,
            transform: None,
        };
    }

    let numeric_block = raw_matrix
        .slice(ndarray::s![.., ..NUMERIC_FEATURES])
        .to_owned();
    let scaler = StandardScaler::fit(&numeric_block);
    let scaled = scaler
        .transform(&numeric_block)
        .unwrap_or_else(|_| numeric_block.clone());

    let mut matrix = raw_matrix.clone();
    matrix
        .slice_mut(ndarray::s![.., ..NUMERIC_FEATURES])
        .assign(&scaled.view());

    TrainingData {
        raw_matrix,
        matrix,
        targets,
        transform: Some(FeatureTransform { scaler, encoder }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrainingSession;
    use chrono::NaiveDate;
    use ndarray::Axis;

    #[test]
    fn test_empty_record_yields_empty_outputs() {
        let record = AthleteRecord::new("test");
        let data = build_training_data(&record);
        assert!(data.is_empty());
        assert_eq!(data.matrix.nrows(), 0);
        assert!(data.transform.is_none());
    }

    #[test]
    fn test_one_row_per_completed_stage() {
        let mut record = AthleteRecord::new("test");
        record.set_stage_result(1, 7.5, 3).unwrap();
        record.set_stage_result(3, 9.0, 1).unwrap();

        let data = build_training_data(&record);
        assert_eq!(data.len(), 2);
        assert_eq!(data.targets.to_vec(), vec![7.5, 9.0]);
        // First element of each raw row is the stage placement
        assert!((data.raw_matrix[[0, 0]] - 3.0).abs() < f64::EPSILON);
        assert!((data.raw_matrix[[1, 0]] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_placement_defaults_to_zero() {
        let mut record = AthleteRecord::new("test");
        record.set_stage_result(2, 6.0, 4).unwrap();
        record.stage_placements[1] = None;

        let data = build_training_data(&record);
        assert_eq!(data.len(), 1);
        assert!(data.raw_matrix[[0, 0]].abs() < f64::EPSILON);
    }

    #[test]
    fn test_session_counts_are_totals() {
        let mut record = AthleteRecord::new("test");
        record.record_sea_session(TrainingSession::Trained {
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        });
        record.record_sea_session(TrainingSession::Skipped { note: "rest".into() });
        record.record_gym_session(TrainingSession::Skipped { note: "rest".into() });
        record.set_stage_result(1, 7.0, 2).unwrap();
        record.set_stage_result(2, 8.0, 1).unwrap();

        let data = build_training_data(&record);
        // Both rows carry the same record-wide counts
        for row in 0..2 {
            assert!((data.raw_matrix[[row, 1]] - 2.0).abs() < f64::EPSILON);
            assert!((data.raw_matrix[[row, 2]] - 1.0).abs() < f64::EPSILON);
        }
        // Sea was trained today, gym never was
        assert!((data.raw_matrix[[0, 3]] - 5.0).abs() < f64::EPSILON);
        assert!((data.raw_matrix[[0, 4]] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_one_hot_columns_appended_unscaled() {
        let mut record = AthleteRecord::new("test");
        record.add_extra_variable("swell", "big", 4).unwrap();
        record.set_stage_result(1, 7.0, 2).unwrap();
        record.set_stage_result(2, 8.0, 1).unwrap();

        let data = build_training_data(&record);
        assert_eq!(data.matrix.ncols(), NUMERIC_FEATURES + 1);
        // One-hot block is identical in raw and standardized matrices
        for row in 0..2 {
            assert!((data.matrix[[row, NUMERIC_FEATURES]] - 4.0).abs() < f64::EPSILON);
            assert!((data.raw_matrix[[row, NUMERIC_FEATURES]] - 4.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_numeric_block_is_standardized() {
        let mut record = AthleteRecord::new("test");
        record.set_stage_result(1, 7.5, 3).unwrap();
        record.set_stage_result(2, 9.0, 1).unwrap();

        let data = build_training_data(&record);
        // Placement column has mean 0 after standardization
        let placement_mean =
            data.matrix.index_axis(Axis(1), 0).sum() / data.len() as f64;
        assert!(placement_mean.abs() < 1e-12);
    }

    #[test]
    fn test_prediction_row_mirrors_training_layout() {
        let mut record = AthleteRecord::new("test");
        record.add_extra_variable("swell", "big", 4).unwrap();
        record.set_stage_result(1, 7.5, 3).unwrap();
        record.set_stage_result(4, 9.0, 1).unwrap();

        let data = build_training_data(&record);
        let transform = data.transform.unwrap();
        let input = transform.apply(&FeatureRow::from_record(&record)).unwrap();
        assert_eq!(input.len(), transform.width());
        assert!(input.iter().all(|v| v.is_finite()));
    }
}
