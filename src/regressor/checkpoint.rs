//! Regressor checkpoint persistence
//!
//! Serializable snapshot of a fitted regression forest, persisted to a
//! well-known JSON artifact so a trained regressor survives restarts.
//! Saves are atomic (write temp file, then rename); loads validate the
//! format version before restoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::forest::RegressionForest;

/// Format version for forward compatibility. Bump when the feature
/// encoding or forest layout changes.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Complete snapshot of a fitted regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorCheckpoint {
    /// Format version.
    pub version: u32,
    /// The fitted forest.
    pub forest: RegressionForest,
    /// Provenance of the fit.
    pub metadata: CheckpointMetadata,
}

/// Metadata attached to a checkpoint for provenance tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    /// When the fit completed.
    pub trained_at: DateTime<Utc>,
    /// Number of measurements the forest was fitted on.
    pub sample_count: usize,
    /// In-sample root-mean-square error of the fit, °C.
    pub training_rmse: f64,
}

/// Artifact load/save failures.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unsupported artifact version {found} (supported: {supported})")]
    VersionMismatch { found: u32, supported: u32 },
}

/// Save a checkpoint to disk atomically (write temp file, then rename).
pub fn save_to_disk(cp: &RegressorCheckpoint, path: &Path) -> Result<(), CheckpointError> {
    let json = serde_json::to_vec(cp)?;

    let tmp_path = path.with_extension("json.tmp");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp_path, &json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load a checkpoint from disk, rejecting unsupported versions.
pub fn load_from_disk(path: &Path) -> Result<RegressorCheckpoint, CheckpointError> {
    let data = std::fs::read(path)?;
    let cp: RegressorCheckpoint = serde_json::from_slice(&data)?;
    if cp.version != CHECKPOINT_VERSION {
        return Err(CheckpointError::VersionMismatch {
            found: cp.version,
            supported: CHECKPOINT_VERSION,
        });
    }
    Ok(cp)
}
