// ABOUTME: Common data models for the athlete record, training sessions, and stage results
// ABOUTME: Provides validated mutation operations used by the HTTP routes and console menu
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Athlete record data model
//!
//! One athlete, four fixed competition stages. Scores and placements live in
//! parallel fixed-length arrays that share indices (stage `i` uses slot
//! `i - 1`). Training sessions are a tagged enum rather than free-form
//! strings so a skipped day with a note never masquerades as a date.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of fixed competition stages in a season
pub const STAGE_COUNT: usize = 4;

/// Baseline quality flag for a training discipline
pub const DEFAULT_SESSION_QUALITY: u8 = 1;

/// Quality flag once the athlete confirms training on the day
pub const TRAINED_SESSION_QUALITY: u8 = 5;

/// Allowed range for extra-variable impact weights
pub const IMPACT_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A single recorded training session
///
/// `Trained` carries the session date; `Skipped` carries the athlete's
/// free-text note about why the session did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrainingSession {
    /// The athlete trained on the given date
    Trained {
        /// Session date
        date: NaiveDate,
    },
    /// The athlete skipped the session
    Skipped {
        /// Athlete's description of the skipped session
        note: String,
    },
}

impl TrainingSession {
    /// Whether this session was an actual training day
    #[must_use]
    pub const fn is_trained(&self) -> bool {
        matches!(self, Self::Trained { .. })
    }
}

/// The full history for the single tracked athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRecord {
    /// Athlete name
    pub name: String,
    /// Ordered sea training sessions
    #[serde(default)]
    pub sea_sessions: Vec<TrainingSession>,
    /// Ordered gym training sessions
    #[serde(default)]
    pub gym_sessions: Vec<TrainingSession>,
    /// Score per stage, `None` until the stage result is recorded
    #[serde(default)]
    pub stage_scores: [Option<f64>; STAGE_COUNT],
    /// Placement per stage, parallel to `stage_scores`
    #[serde(default)]
    pub stage_placements: [Option<u32>; STAGE_COUNT],
    /// User-defined categorical factors, keyed by variable name
    #[serde(default)]
    pub extra_variables: BTreeMap<String, String>,
    /// Impact weight (1-5) per extra variable, parallel to `extra_variables`
    #[serde(default)]
    pub extra_impacts: BTreeMap<String, u8>,
    /// Sea training quality flag (1 baseline, 5 once a trained day is recorded)
    #[serde(default = "default_quality")]
    pub sea_quality: u8,
    /// Gym training quality flag (1 baseline, 5 once a trained day is recorded)
    #[serde(default = "default_quality")]
    pub gym_quality: u8,
}

const fn default_quality() -> u8 {
    DEFAULT_SESSION_QUALITY
}

impl AthleteRecord {
    /// Create an empty record for the given athlete
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sea_sessions: Vec::new(),
            gym_sessions: Vec::new(),
            stage_scores: [None; STAGE_COUNT],
            stage_placements: [None; STAGE_COUNT],
            extra_variables: BTreeMap::new(),
            extra_impacts: BTreeMap::new(),
            sea_quality: DEFAULT_SESSION_QUALITY,
            gym_quality: DEFAULT_SESSION_QUALITY,
        }
    }

    /// Record a sea session, elevating the sea quality flag on a trained day
    pub fn record_sea_session(&mut self, session: TrainingSession) {
        if session.is_trained() {
            self.sea_quality = TRAINED_SESSION_QUALITY;
        }
        self.sea_sessions.push(session);
    }

    /// Record a gym session, elevating the gym quality flag on a trained day
    pub fn record_gym_session(&mut self, session: TrainingSession) {
        if session.is_trained() {
            self.gym_quality = TRAINED_SESSION_QUALITY;
        }
        self.gym_sessions.push(session);
    }

    /// Record the score and placement for a stage (1-based)
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a stage outside 1..=4 and `InvalidInput`
    /// for a non-finite score
    pub fn set_stage_result(&mut self, stage: usize, score: f64, placement: u32) -> AppResult<()> {
        if stage == 0 || stage > STAGE_COUNT {
            return Err(AppError::out_of_range(format!(
                "stage must be between 1 and {STAGE_COUNT}, got {stage}"
            )));
        }
        if !score.is_finite() {
            return Err(AppError::invalid_input("score must be a finite number"));
        }

        self.stage_scores[stage - 1] = Some(score);
        self.stage_placements[stage - 1] = Some(placement);
        Ok(())
    }

    /// Register an extra categorical variable with its impact weight
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for an empty name and `ValueOutOfRange`
    /// for an impact outside 1..=5
    pub fn add_extra_variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        impact: u8,
    ) -> AppResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if !IMPACT_RANGE.contains(&impact) {
            return Err(AppError::out_of_range(format!(
                "impact must be between 1 and 5, got {impact}"
            )));
        }

        self.extra_variables.insert(name.clone(), value.into());
        self.extra_impacts.insert(name, impact);
        Ok(())
    }

    /// Number of stages with a recorded score
    #[must_use]
    pub fn completed_stage_count(&self) -> usize {
        self.stage_scores.iter().flatten().count()
    }

    /// Placement of the last stage slot, 0 when unset
    ///
    /// The prognosis row uses the final slot's placement the way the web form
    /// does, regardless of which stages are filled in.
    #[must_use]
    pub fn latest_placement(&self) -> u32 {
        self.stage_placements[STAGE_COUNT - 1].unwrap_or(0)
    }

    /// Total number of recorded sea sessions, trained or skipped
    #[must_use]
    pub fn sea_session_count(&self) -> usize {
        self.sea_sessions.len()
    }

    /// Total number of recorded gym sessions, trained or skipped
    #[must_use]
    pub fn gym_session_count(&self) -> usize {
        self.gym_sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained(y: i32, m: u32, d: u32) -> TrainingSession {
        TrainingSession::Trained {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_new_record_defaults() {
        let record = AthleteRecord::new("Wesley Leite");
        assert_eq!(record.name, "Wesley Leite");
        assert_eq!(record.completed_stage_count(), 0);
        assert_eq!(record.sea_quality, DEFAULT_SESSION_QUALITY);
        assert_eq!(record.gym_quality, DEFAULT_SESSION_QUALITY);
        assert_eq!(record.latest_placement(), 0);
    }

    #[test]
    fn test_trained_session_elevates_quality() {
        let mut record = AthleteRecord::new("test");
        record.record_sea_session(trained(2025, 3, 10));
        assert_eq!(record.sea_quality, TRAINED_SESSION_QUALITY);
        // A skipped day afterwards does not reset the flag
        record.record_sea_session(TrainingSession::Skipped {
            note: "flat sea".into(),
        });
        assert_eq!(record.sea_quality, TRAINED_SESSION_QUALITY);
        assert_eq!(record.sea_session_count(), 2);
    }

    #[test]
    fn test_skipped_session_keeps_baseline_quality() {
        let mut record = AthleteRecord::new("test");
        record.record_gym_session(TrainingSession::Skipped {
            note: "travel day".into(),
        });
        assert_eq!(record.gym_quality, DEFAULT_SESSION_QUALITY);
        assert_eq!(record.gym_session_count(), 1);
    }

    #[test]
    fn test_stage_result_validation() {
        let mut record = AthleteRecord::new("test");
        assert!(record.set_stage_result(0, 7.0, 1).is_err());
        assert!(record.set_stage_result(5, 7.0, 1).is_err());
        assert!(record.set_stage_result(2, f64::NAN, 1).is_err());

        record.set_stage_result(2, 8.5, 4).unwrap();
        assert_eq!(record.stage_scores[1], Some(8.5));
        assert_eq!(record.stage_placements[1], Some(4));
        assert_eq!(record.completed_stage_count(), 1);
    }

    #[test]
    fn test_extra_variable_validation() {
        let mut record = AthleteRecord::new("test");
        assert!(record.add_extra_variable("", "x", 3).is_err());
        assert!(record.add_extra_variable("swell", "big", 0).is_err());
        assert!(record.add_extra_variable("swell", "big", 6).is_err());

        record.add_extra_variable("swell", "big", 4).unwrap();
        assert_eq!(record.extra_variables.get("swell"), Some(&"big".into()));
        assert_eq!(record.extra_impacts.get("swell"), Some(&4));
    }

    #[test]
    fn test_record_serde_round_trip() {
        let mut record = AthleteRecord::new("test");
        record.record_sea_session(trained(2025, 1, 5));
        record.set_stage_result(1, 7.5, 3).unwrap();
        record.add_extra_variable("board", "new", 2).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let restored: AthleteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        // Older history files may miss the quality flags and session lists
        let restored: AthleteRecord =
            serde_json::from_str(r#"{"name":"test"}"#).unwrap();
        assert_eq!(restored.sea_quality, DEFAULT_SESSION_QUALITY);
        assert!(restored.sea_sessions.is_empty());
        assert_eq!(restored.completed_stage_count(), 0);
    }
}
