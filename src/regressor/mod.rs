//! Trainable regression component
//!
//! Accumulates field measurements and incrementally fits a bagged
//! regression forest over {depth, lithology, surface temperature, season}.
//! Lifecycle is one-way within a session: untrained → trained on the first
//! successful fit; re-training re-fits in place. The fitted forest is
//! persisted to a well-known JSON artifact and reloaded best-effort at
//! startup — any load failure is an expected cold start, not an error.
//!
//! While untrained, `predict` delegates to the physical attenuation model,
//! so the component never fails outright.

pub mod checkpoint;
pub mod forest;

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::TrainingConfig;
use crate::error::EngineError;
use crate::physics;
use crate::types::{Lithology, Season, TrainingSample, NUM_FEATURES};

use checkpoint::{CheckpointMetadata, RegressorCheckpoint, CHECKPOINT_VERSION};
use forest::{ForestConfig, RegressionForest};

/// Outcome of a successful fit.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Number of measurements the forest was fitted on.
    pub samples_used: usize,
    /// In-sample root-mean-square error, °C.
    pub training_rmse: f64,
    /// Whether the artifact was written. A failed save is a warning, not a
    /// training failure — the in-memory fit stands.
    pub persisted: bool,
}

impl std::fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "trained on {} measurements (RMSE {:.2} °C{})",
            self.samples_used,
            self.training_rmse,
            if self.persisted { "" } else { ", not persisted" }
        )
    }
}

/// Incrementally trained temperature regressor.
pub struct TemperatureRegressor {
    samples: Vec<TrainingSample>,
    forest: Option<RegressionForest>,
    config: TrainingConfig,
    artifact_path: PathBuf,
}

impl TemperatureRegressor {
    /// Create an untrained regressor with no persisted state.
    pub fn new(config: TrainingConfig, artifact_path: PathBuf) -> Self {
        Self {
            samples: Vec::new(),
            forest: None,
            config,
            artifact_path,
        }
    }

    /// Create a regressor, restoring a previously persisted fit if one
    /// exists at `artifact_path`.
    ///
    /// The degrade policy lives here and only here: missing file, corrupt
    /// format, or version mismatch all mean "start untrained". A missing
    /// artifact is the normal first run and logs at info; anything else
    /// logs at warn so a corrupted artifact is noticed.
    pub fn load_or_untrained(config: TrainingConfig, artifact_path: PathBuf) -> Self {
        let mut regressor = Self::new(config, artifact_path);
        match checkpoint::load_from_disk(&regressor.artifact_path) {
            Ok(cp) => {
                info!(
                    path = %regressor.artifact_path.display(),
                    samples = cp.metadata.sample_count,
                    trained_at = %cp.metadata.trained_at,
                    "Restored regressor from checkpoint"
                );
                regressor.forest = Some(cp.forest);
            }
            Err(checkpoint::CheckpointError::Io(e))
                if e.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(
                    path = %regressor.artifact_path.display(),
                    "No regressor checkpoint found — starting untrained"
                );
            }
            Err(e) => {
                warn!(
                    path = %regressor.artifact_path.display(),
                    error = %e,
                    "Failed to load regressor checkpoint — starting untrained"
                );
            }
        }
        regressor
    }

    /// Whether a fit has completed (this session or restored from disk).
    pub fn is_trained(&self) -> bool {
        self.forest.is_some()
    }

    /// Number of accumulated measurements.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Path of the persisted artifact.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Append a field measurement. Unconditional — samples are append-only
    /// and never validated beyond the facade's input checks.
    pub fn add_sample(&mut self, sample: TrainingSample) {
        self.samples.push(sample);
    }

    /// Fit the forest over all accumulated measurements.
    ///
    /// Fails with [`EngineError::InsufficientData`] below the configured
    /// minimum. On success the regressor is trained (re-fit in place if it
    /// already was) and the artifact is persisted with last-fit-wins
    /// overwrite semantics. A save failure downgrades to a warning in the
    /// returned report.
    pub fn train(&mut self) -> Result<TrainingReport, EngineError> {
        let have = self.samples.len();
        let need = self.config.min_samples;
        if have < need {
            return Err(EngineError::InsufficientData { have, need });
        }

        let features: Vec<[f64; NUM_FEATURES]> =
            self.samples.iter().map(TrainingSample::features).collect();
        let targets: Vec<f64> = self.samples.iter().map(|s| s.actual_temp).collect();

        let forest = RegressionForest::fit(
            &features,
            &targets,
            ForestConfig {
                trees: self.config.forest_size,
                max_depth: self.config.max_depth,
                min_leaf: self.config.min_leaf,
                seed: self.config.seed,
            },
        );

        let training_rmse = rmse(&forest, &features, &targets);

        let cp = RegressorCheckpoint {
            version: CHECKPOINT_VERSION,
            forest: forest.clone(),
            metadata: CheckpointMetadata {
                trained_at: chrono::Utc::now(),
                sample_count: have,
                training_rmse,
            },
        };
        let persisted = match checkpoint::save_to_disk(&cp, &self.artifact_path) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    path = %self.artifact_path.display(),
                    error = %e,
                    "Failed to persist regressor checkpoint — fit kept in memory"
                );
                false
            }
        };

        self.forest = Some(forest);
        info!(
            samples = have,
            rmse = training_rmse,
            persisted, "Regressor training complete"
        );

        Ok(TrainingReport {
            samples_used: have,
            training_rmse,
            persisted,
        })
    }

    /// Predict temperature at depth, °C.
    ///
    /// Trained: forest inference rounded to two decimals. Untrained:
    /// delegates to the physical attenuation model, so this never fails.
    pub fn predict(
        &self,
        depth: f64,
        lithology: Lithology,
        surface_temp: f64,
        season: Option<Season>,
    ) -> f64 {
        match &self.forest {
            Some(forest) => {
                let probe = TrainingSample {
                    depth,
                    lithology,
                    surface_temp,
                    season,
                    actual_temp: 0.0,
                };
                round2(forest.predict(&probe.features()))
            }
            None => physics::attenuated_temperature(depth, lithology, surface_temp, season),
        }
    }
}

fn rmse(forest: &RegressionForest, features: &[[f64; NUM_FEATURES]], targets: &[f64]) -> f64 {
    let sum_sq: f64 = features
        .iter()
        .zip(targets)
        .map(|(f, t)| {
            let d = forest.predict(f) - t;
            d * d
        })
        .sum();
    (sum_sq / targets.len() as f64).sqrt()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
