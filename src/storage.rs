// ABOUTME: History repository abstraction over the flat JSON record file
// ABOUTME: Implements full-overwrite persistence with an atomic temp-file rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Athlete history persistence
//!
//! One record, one file. Every mutation rewrites the whole file; the write
//! goes to a sibling temp file first and is renamed into place so a crash
//! mid-write never leaves a truncated history behind.

use crate::errors::{AppError, AppResult};
use crate::models::AthleteRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Load/save boundary between the tracker core and its backing store
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Load the stored record, `None` when no history exists yet
    async fn load(&self) -> AppResult<Option<AthleteRecord>>;

    /// Persist the record, replacing any previous history
    async fn save(&self, record: &AthleteRecord) -> AppResult<()>;
}

/// JSON-file backed history repository
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    /// Create a repository over the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| "history".into(), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryRepository for JsonFileHistory {
    async fn load(&self) -> AppResult<Option<AthleteRecord>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file, starting fresh");
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "failed to read history file {}: {e}",
                    self.path.display()
                ))
                .with_source(e));
            }
        };

        let record: AthleteRecord = serde_json::from_slice(&raw)?;
        info!(
            path = %self.path.display(),
            athlete = %record.name,
            "History loaded"
        );
        Ok(Some(record))
    }

    async fn save(&self, record: &AthleteRecord) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(record)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, &json).await?;
        fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), bytes = json.len(), "History saved");
        Ok(())
    }
}
