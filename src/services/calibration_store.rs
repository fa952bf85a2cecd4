//! Calibration persistence and the shared in-process state.
//!
//! Persistence is best effort by contract: a calibration is a convenience
//! the user can redo in seconds, so a broken disk must never take the
//! analysis endpoints down. Every storage failure is logged and swallowed,
//! and the in-memory state stays authoritative.

use crate::analysis::Calibration;
use crate::models::Category;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// On-disk document wrapping the calibration with its write timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCalibration {
    updated_at: DateTime<Utc>,
    calibration: Calibration,
}

/// Storage backend for the calibration. Implementations never surface
/// errors; they log and return as if nothing was stored.
#[async_trait]
pub trait CalibrationRepository: Send + Sync {
    /// Previously persisted calibration, if one can be read.
    async fn load(&self) -> Option<Calibration>;

    /// Persist the given calibration, best effort.
    async fn save(&self, calibration: &Calibration);

    /// Remove any persisted calibration, best effort.
    async fn clear(&self);
}

/// JSON file on local disk, one document per deployment.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CalibrationRepository for JsonFileRepository {
    async fn load(&self) -> Option<Calibration> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No calibration file");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read calibration file");
                return None;
            }
        };
        match serde_json::from_slice::<StoredCalibration>(&bytes) {
            Ok(stored) => {
                tracing::info!(
                    path = %self.path.display(),
                    updated_at = %stored.updated_at,
                    "Loaded calibration"
                );
                Some(stored.calibration)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Calibration file is not valid JSON, ignoring");
                None
            }
        }
    }

    async fn save(&self, calibration: &Calibration) {
        let stored = StoredCalibration {
            updated_at: Utc::now(),
            calibration: calibration.clone(),
        };
        let json = match serde_json::to_vec_pretty(&stored) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize calibration");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, json).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write calibration file");
        }
    }

    async fn clear(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove calibration file");
            }
        }
    }
}

/// Volatile storage, used when no calibration file is configured.
#[derive(Default)]
pub struct InMemoryRepository {
    slot: RwLock<Option<Calibration>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalibrationRepository for InMemoryRepository {
    async fn load(&self) -> Option<Calibration> {
        self.slot.read().await.clone()
    }

    async fn save(&self, calibration: &Calibration) {
        *self.slot.write().await = Some(calibration.clone());
    }

    async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

/// The calibration as the rest of the application sees it: an in-memory
/// value mutated through here, mirrored to the repository after every
/// change.
pub struct CalibrationService {
    current: RwLock<Calibration>,
    repo: Arc<dyn CalibrationRepository>,
}

impl CalibrationService {
    pub fn new(repo: Arc<dyn CalibrationRepository>) -> Self {
        Self {
            current: RwLock::new(Calibration::default()),
            repo,
        }
    }

    /// Adopt a previously persisted calibration, if any. Called once at
    /// startup.
    pub async fn load_persisted(&self) {
        if let Some(calibration) = self.repo.load().await {
            *self.current.write().await = calibration;
        }
    }

    pub async fn get(&self) -> Calibration {
        self.current.read().await.clone()
    }

    /// Merge a partial calibration over the current one and persist the
    /// result.
    pub async fn update(&self, partial: &Calibration) -> Calibration {
        let snapshot = {
            let mut current = self.current.write().await;
            current.merge(partial);
            current.clone()
        };
        self.repo.save(&snapshot).await;
        snapshot
    }

    /// Set a single category's reference color, as the picker endpoint
    /// does, and persist.
    pub async fn set_entry(&self, category: Category, rgb: [u8; 3]) -> Calibration {
        let snapshot = {
            let mut current = self.current.write().await;
            current.set(category, rgb);
            current.clone()
        };
        self.repo.save(&snapshot).await;
        snapshot
    }

    pub async fn clear(&self) {
        self.current.write().await.clear();
        self.repo.clear().await;
    }
}
