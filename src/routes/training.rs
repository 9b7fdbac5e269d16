// ABOUTME: Training session route handlers for sea and gym workout recording
// ABOUTME: Accepts trained-day dates or skipped-day notes and persists the updated record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training session routes
//!
//! The form carries either a `date` (the athlete trained) or a `note` (the
//! athlete skipped and says why). A trained day elevates the discipline's
//! quality flag on the record.

use crate::errors::AppError;
use crate::models::TrainingSession;
use crate::routes::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Form payload for recording a session
#[derive(Debug, Deserialize)]
pub struct RegisterSessionRequest {
    /// Session date when the athlete trained
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free-text note when the athlete skipped
    #[serde(default)]
    pub note: Option<String>,
}

impl RegisterSessionRequest {
    fn into_session(self) -> Result<TrainingSession, AppError> {
        match (self.date, self.note) {
            (Some(_), Some(_)) => Err(AppError::invalid_input(
                "provide either a date or a note, not both",
            )),
            (Some(date), None) => Ok(TrainingSession::Trained { date }),
            (None, Some(note)) if !note.trim().is_empty() => {
                Ok(TrainingSession::Skipped { note })
            }
            _ => Err(AppError::missing_field("date")),
        }
    }
}

/// Which discipline a handler records into
#[derive(Debug, Clone, Copy)]
enum Discipline {
    Sea,
    Gym,
}

impl Discipline {
    const fn label(self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::Gym => "gym",
        }
    }
}

/// Training routes implementation
pub struct TrainingRoutes;

impl TrainingRoutes {
    /// Create all training session routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/training/sea", post(Self::handle_sea_session))
            .route("/training/gym", post(Self::handle_gym_session))
            .with_state(resources)
    }

    async fn handle_sea_session(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<RegisterSessionRequest>,
    ) -> Result<Response, AppError> {
        Self::record_session(&resources, Discipline::Sea, request).await
    }

    async fn handle_gym_session(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<RegisterSessionRequest>,
    ) -> Result<Response, AppError> {
        Self::record_session(&resources, Discipline::Gym, request).await
    }

    async fn record_session(
        resources: &Arc<ServerResources>,
        discipline: Discipline,
        request: RegisterSessionRequest,
    ) -> Result<Response, AppError> {
        let session = request.into_session()?;
        info!(
            discipline = discipline.label(),
            trained = session.is_trained(),
            "Recording training session"
        );

        let mut record = resources.athlete.write().await;
        match discipline {
            Discipline::Sea => record.record_sea_session(session),
            Discipline::Gym => record.record_gym_session(session),
        }
        resources.history.save(&record).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{} session recorded", discipline.label())
            })),
        )
            .into_response())
    }
}
