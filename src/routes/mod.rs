// ABOUTME: Route module organization for the Maresia HTTP endpoints
// ABOUTME: Provides shared server resources and the assembled application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Routes are organized by domain. Each module contains route definitions and
//! thin handler functions; the handlers mutate the shared record, persist it
//! through the history repository, and answer with small JSON payloads.

use crate::config::ServerConfig;
use crate::models::AthleteRecord;
use crate::storage::HistoryRepository;
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Health check and system status routes
pub mod health;
/// Prognosis and record inspection routes
pub mod prognosis;
/// Stage result and extra-variable routes
pub mod stages;
/// Training session recording routes
pub mod training;

pub use health::HealthRoutes;
pub use prognosis::PrognosisRoutes;
pub use stages::StageRoutes;
pub use training::TrainingRoutes;

/// Shared state for all route handlers
pub struct ServerResources {
    /// The single tracked athlete record
    pub athlete: RwLock<AthleteRecord>,
    /// Persistence for the record
    pub history: Box<dyn HistoryRepository>,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the record, repository, and configuration for the router
    #[must_use]
    pub fn new(
        athlete: AthleteRecord,
        history: Box<dyn HistoryRepository>,
        config: ServerConfig,
    ) -> Self {
        Self {
            athlete: RwLock::new(athlete),
            history,
            config,
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(TrainingRoutes::routes(resources.clone()))
        .merge(StageRoutes::routes(resources.clone()))
        .merge(PrognosisRoutes::routes(resources));

    Router::new()
        .merge(HealthRoutes::routes())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
