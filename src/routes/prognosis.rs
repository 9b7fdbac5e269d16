// ABOUTME: Prognosis route handlers producing the projected next score
// ABOUTME: Rebuilds features and refits the regression from the current record on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prognosis routes
//!
//! The model is rebuilt from the record on every request; the fitted
//! transforms from that build are the ones applied to the prediction row.

use crate::errors::AppError;
use crate::intelligence::prognosis::{format_prognosis, PrognosisModel};
use crate::routes::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

/// Prognosis routes implementation
pub struct PrognosisRoutes;

impl PrognosisRoutes {
    /// Create the prognosis and record inspection routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/prognosis", post(Self::handle_prognosis))
            .route("/athlete", get(Self::handle_get_athlete))
            .with_state(resources)
    }

    async fn handle_prognosis(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let record = resources.athlete.read().await;
        let model = PrognosisModel::fit_record(&record)?;
        let projected = model.predict_next(&record)?;

        info!(athlete = %record.name, projected, "Prognosis generated");

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "prognostico": format_prognosis(projected)
            })),
        )
            .into_response())
    }

    async fn handle_get_athlete(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let record = resources.athlete.read().await;
        Ok((StatusCode::OK, Json(record.clone())).into_response())
    }
}
