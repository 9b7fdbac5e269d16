// ABOUTME: Stage result and extra-variable route handlers
// ABOUTME: Validates stage numbers, scores, placements, and impact weights before persisting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Stage result and extra-variable routes

use crate::errors::AppError;
use crate::routes::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Form payload for a stage result
#[derive(Debug, Deserialize)]
pub struct StageResultRequest {
    /// Stage number, 1-based
    pub stage: usize,
    /// Score achieved at the stage
    pub score: f64,
    /// Placement (rank) at the stage
    pub placement: u32,
}

/// Form payload for registering an extra variable
#[derive(Debug, Deserialize)]
pub struct ExtraVariableRequest {
    /// Variable name
    pub name: String,
    /// Current categorical value
    pub value: String,
    /// Impact weight, 1 to 5
    pub impact: u8,
}

/// Stage and extra-variable routes implementation
pub struct StageRoutes;

impl StageRoutes {
    /// Create all stage and variable routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/stages", post(Self::handle_stage_result))
            .route("/variables", post(Self::handle_extra_variable))
            .with_state(resources)
    }

    async fn handle_stage_result(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<StageResultRequest>,
    ) -> Result<Response, AppError> {
        info!(
            stage = request.stage,
            score = request.score,
            placement = request.placement,
            "Recording stage result"
        );

        let mut record = resources.athlete.write().await;
        record.set_stage_result(request.stage, request.score, request.placement)?;
        resources.history.save(&record).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("stage {} result recorded", request.stage)
            })),
        )
            .into_response())
    }

    async fn handle_extra_variable(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<ExtraVariableRequest>,
    ) -> Result<Response, AppError> {
        info!(
            name = %request.name,
            impact = request.impact,
            "Registering extra variable"
        );

        let mut record = resources.athlete.write().await;
        record.add_extra_variable(request.name.clone(), request.value, request.impact)?;
        resources.history.save(&record).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("variable '{}' registered", request.name)
            })),
        )
            .into_response())
    }
}
