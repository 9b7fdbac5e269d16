// ABOUTME: Preprocessing transforms for the prognosis feature matrix
// ABOUTME: Implements column standardization and impact-weighted one-hot encoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Standardization and one-hot encoding
//!
//! Both transforms are fitted once per training pass and reused verbatim for
//! every later prediction. Fitting a fresh scaler on a one-row prediction
//! input would standardize that row against itself, so the fitted state is
//! the unit of reuse here, not the fitting routine.

use crate::errors::{AppError, AppResult};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-column zero-mean/unit-variance scaler
///
/// Zero-variance columns keep a divisor of 1 so constant features pass
/// through centered instead of producing NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler to the columns of `matrix`
    #[must_use]
    pub fn fit(matrix: &Array2<f64>) -> Self {
        let n = matrix.nrows() as f64;
        let mut means = Vec::with_capacity(matrix.ncols());
        let mut stds = Vec::with_capacity(matrix.ncols());

        for column in matrix.axis_iter(Axis(1)) {
            let mean = column.sum() / n;
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            means.push(mean);
            stds.push(if std > 0.0 { std } else { 1.0 });
        }

        Self { means, stds }
    }

    /// Number of columns the scaler was fitted on
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Standardize a full matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the column count differs from the fit
    pub fn transform(&self, matrix: &Array2<f64>) -> AppResult<Array2<f64>> {
        self.check_width(matrix.ncols())?;
        let mut scaled = matrix.clone();
        for (j, mut column) in scaled.axis_iter_mut(Axis(1)).enumerate() {
            column.mapv_inplace(|v| (v - self.means[j]) / self.stds[j]);
        }
        Ok(scaled)
    }

    /// Standardize a single row
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the row length differs from the fit
    pub fn transform_row(&self, row: &Array1<f64>) -> AppResult<Array1<f64>> {
        self.check_width(row.len())?;
        Ok(Array1::from_iter(
            row.iter()
                .enumerate()
                .map(|(j, v)| (v - self.means[j]) / self.stds[j]),
        ))
    }

    /// Undo the standardization of a matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the column count differs from the fit
    pub fn inverse_transform(&self, matrix: &Array2<f64>) -> AppResult<Array2<f64>> {
        self.check_width(matrix.ncols())?;
        let mut restored = matrix.clone();
        for (j, mut column) in restored.axis_iter_mut(Axis(1)).enumerate() {
            column.mapv_inplace(|v| v * self.stds[j] + self.means[j]);
        }
        Ok(restored)
    }

    fn check_width(&self, width: usize) -> AppResult<()> {
        if width == self.n_features() {
            Ok(())
        } else {
            Err(AppError::invalid_input(format!(
                "expected {} feature columns, got {width}",
                self.n_features()
            )))
        }
    }
}

/// One encoded output column: a (variable, category) pair seen at fit time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EncodedColumn {
    variable: String,
    category: String,
}

/// Impact-weighted one-hot encoder over the extra variables
///
/// Columns are ordered by variable name (the record stores variables in a
/// `BTreeMap`, so the order is stable across fit and predict). A category
/// never seen at fit time encodes to all zeros rather than failing, matching
/// `handle_unknown="ignore"` semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<EncodedColumn>,
}

impl OneHotEncoder {
    /// Fit the encoder to the variable values present on the record
    #[must_use]
    pub fn fit(values: &BTreeMap<String, String>) -> Self {
        let columns = values
            .iter()
            .map(|(variable, category)| EncodedColumn {
                variable: variable.clone(),
                category: category.clone(),
            })
            .collect();
        Self { columns }
    }

    /// Number of encoded columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Encode the given variable values into the fitted column layout
    ///
    /// A matching category contributes the variable's impact weight
    /// (defaulting to 1 when no impact was recorded); anything else,
    /// including unseen categories and missing variables, contributes 0.
    #[must_use]
    pub fn encode(
        &self,
        values: &BTreeMap<String, String>,
        impacts: &BTreeMap<String, u8>,
    ) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| {
                let matches = values
                    .get(&column.variable)
                    .is_some_and(|value| *value == column.category);
                if matches {
                    f64::from(impacts.get(&column.variable).copied().unwrap_or(1))
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_scaler_zero_mean_unit_variance() {
        let matrix = array![[1.0, 10.0], [3.0, 30.0], [5.0, 50.0]];
        let scaler = StandardScaler::fit(&matrix);
        let scaled = scaler.transform(&matrix).unwrap();

        for column in scaled.axis_iter(Axis(1)) {
            let mean = column.sum() / 3.0;
            assert!(mean.abs() < 1e-12);
        }
        // Middle row sits on the mean of both columns
        assert!(scaled[[1, 0]].abs() < 1e-12);
        assert!(scaled[[1, 1]].abs() < 1e-12);
    }

    #[test]
    fn test_scaler_constant_column_no_nan() {
        let matrix = array![[2.0, 7.0], [2.0, 9.0]];
        let scaler = StandardScaler::fit(&matrix);
        let scaled = scaler.transform(&matrix).unwrap();
        assert!(scaled.iter().all(|v| v.is_finite()));
        // Constant column centers to zero with divisor 1
        assert!(scaled[[0, 0]].abs() < 1e-12);
    }

    #[test]
    fn test_scaler_round_trip() {
        let matrix = array![[3.0, 7.5, 1.0], [1.0, 9.0, 5.0], [2.0, 8.1, 3.0]];
        let scaler = StandardScaler::fit(&matrix);
        let restored = scaler
            .inverse_transform(&scaler.transform(&matrix).unwrap())
            .unwrap();
        for (a, b) in matrix.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let scaler = StandardScaler::fit(&array![[1.0, 2.0], [3.0, 4.0]]);
        let row = Array1::from(vec![1.0, 2.0, 3.0]);
        assert!(scaler.transform_row(&row).is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_encoder_matches_fit_categories() {
        let fitted_on = vars(&[("swell", "big"), ("board", "new")]);
        let impacts = BTreeMap::from([("swell".to_owned(), 4), ("board".to_owned(), 2)]);
        let encoder = OneHotEncoder::fit(&fitted_on);
        assert_eq!(encoder.width(), 2);

        // BTreeMap order: board before swell
        let encoded = encoder.encode(&fitted_on, &impacts);
        assert_eq!(encoded, vec![2.0, 4.0]);
    }

    #[test]
    fn test_encoder_unseen_category_is_zero() {
        let encoder = OneHotEncoder::fit(&vars(&[("swell", "big")]));
        let encoded = encoder.encode(&vars(&[("swell", "small")]), &BTreeMap::new());
        assert_eq!(encoded, vec![0.0]);
    }

    #[test]
    fn test_encoder_missing_variable_is_zero() {
        let encoder = OneHotEncoder::fit(&vars(&[("swell", "big")]));
        let encoded = encoder.encode(&BTreeMap::new(), &BTreeMap::new());
        assert_eq!(encoded, vec![0.0]);
    }

    #[test]
    fn test_encoder_default_impact_is_one() {
        let values = vars(&[("swell", "big")]);
        let encoder = OneHotEncoder::fit(&values);
        let encoded = encoder.encode(&values, &BTreeMap::new());
        assert_eq!(encoded, vec![1.0]);
    }
}
