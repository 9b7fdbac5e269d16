// ABOUTME: Ordinary least squares prognosis model over the assembled feature matrix
// ABOUTME: Provides one-shot fit/predict plus a cached engine for interactive callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Score prognosis
//!
//! Plain ordinary least squares, no regularization, no cross-validation. The
//! fitted model carries the feature transforms it was trained with, so a
//! prediction row is standardized and encoded exactly as the training matrix
//! was. A single training row is accepted; the solver degenerates to the
//! intercept in that case.

use crate::errors::{AppError, AppResult};
use crate::intelligence::features::{
    build_training_data, FeatureRow, FeatureTransform, TrainingData,
};
use crate::models::AthleteRecord;
use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::Axis;
use tracing::debug;

/// A fitted prognosis model together with its feature transforms
#[derive(Debug, Clone)]
pub struct PrognosisModel {
    fitted: FittedLinearRegression<f64>,
    transform: FeatureTransform,
}

impl PrognosisModel {
    /// Fit an OLS model on assembled training data
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when the data holds no rows, and
    /// `InternalError` when the underlying solver fails
    pub fn fit(data: &TrainingData) -> AppResult<Self> {
        let transform = data.transform.clone().ok_or_else(|| {
            AppError::insufficient_data("no completed stages to train on")
        })?;
        if data.is_empty() {
            return Err(AppError::insufficient_data(
                "no completed stages to train on",
            ));
        }

        let dataset = Dataset::new(data.matrix.clone(), data.targets.clone());
        let fitted = LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| AppError::internal(format!("least squares solve failed: {e}")))?;

        debug!(
            rows = data.len(),
            columns = data.matrix.ncols(),
            "Prognosis model fitted"
        );

        Ok(Self { fitted, transform })
    }

    /// Convenience: assemble features from the record and fit
    ///
    /// # Errors
    ///
    /// Same conditions as [`PrognosisModel::fit`]
    pub fn fit_record(record: &AthleteRecord) -> AppResult<Self> {
        Self::fit(&build_training_data(record))
    }

    /// Project the score for a raw feature row
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the row does not match the fitted layout
    pub fn predict(&self, row: &FeatureRow) -> AppResult<f64> {
        let input = self.transform.apply(row)?;
        let batch = input.insert_axis(Axis(0));
        Ok(self.fitted.predict(&batch)[0])
    }

    /// Project the athlete's next score from the current record state
    ///
    /// # Errors
    ///
    /// Same conditions as [`PrognosisModel::predict`]
    pub fn predict_next(&self, record: &AthleteRecord) -> AppResult<f64> {
        self.predict(&FeatureRow::from_record(record))
    }
}

/// Stateful wrapper that keeps the last fitted model across calls
///
/// The HTTP handlers rebuild the model on every request; the console menu
/// trains once per mutation and forecasts from the cached model, which is
/// where the `ModelNotTrained` condition comes from.
#[derive(Debug, Clone, Default)]
pub struct PrognosisEngine {
    model: Option<PrognosisModel>,
}

impl PrognosisEngine {
    /// Create an engine with no trained model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a model is available for forecasting
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Fit and cache a model from the record
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when the record has no completed stages
    pub fn train(&mut self, record: &AthleteRecord) -> AppResult<()> {
        self.model = Some(PrognosisModel::fit_record(record)?);
        Ok(())
    }

    /// Forecast the next score from the cached model
    ///
    /// # Errors
    ///
    /// Returns `ModelNotTrained` before the first successful `train`
    pub fn forecast(&self, record: &AthleteRecord) -> AppResult<f64> {
        let model = self.model.as_ref().ok_or_else(AppError::model_not_trained)?;
        model.predict_next(record)
    }
}

/// Render a projected score as the user-facing prognosis message
#[must_use]
pub fn format_prognosis(value: f64) -> String {
    format!("Prognóstico: {value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_fit_empty_record_is_insufficient_data() {
        let record = AthleteRecord::new("test");
        let err = PrognosisModel::fit_record(&record).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientData);
    }

    #[test]
    fn test_fit_single_row_succeeds() {
        let mut record = AthleteRecord::new("test");
        record.set_stage_result(1, 7.5, 3).unwrap();

        let model = PrognosisModel::fit_record(&record).unwrap();
        let projected = model.predict_next(&record).unwrap();
        assert!(projected.is_finite());
    }

    #[test]
    fn test_engine_forecast_before_train() {
        let record = AthleteRecord::new("test");
        let engine = PrognosisEngine::new();
        let err = engine.forecast(&record).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelNotTrained);
    }

    #[test]
    fn test_engine_train_then_forecast() {
        let mut record = AthleteRecord::new("test");
        record.set_stage_result(1, 7.5, 3).unwrap();
        record.set_stage_result(2, 9.0, 1).unwrap();

        let mut engine = PrognosisEngine::new();
        assert!(!engine.is_trained());
        engine.train(&record).unwrap();
        assert!(engine.is_trained());
        assert!(engine.forecast(&record).unwrap().is_finite());
    }

    #[test]
    fn test_format_prognosis_two_decimals() {
        assert_eq!(format_prognosis(7.456), "Prognóstico: 7.46");
        assert_eq!(format_prognosis(9.0), "Prognóstico: 9.00");
    }
}
