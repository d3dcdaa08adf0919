//! Engine configuration — prediction and training tunables as TOML values
//!
//! Every tunable that was previously a hardcoded constant is a field here.
//! Each struct implements `Default` with values matching `defaults.rs`, so
//! behavior is unchanged when no config file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::BlendStrategy;

/// Root configuration for an engine session.
///
/// Load with [`EngineConfig::load`], which searches:
/// 1. `$PERMATECH_CONFIG` env var
/// 2. `./permatech.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Regressor training tunables
    #[serde(default)]
    pub training: TrainingConfig,

    /// Prediction blend policy
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Artifact persistence locations
    #[serde(default)]
    pub models: ModelsConfig,
}

/// Regressor training tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Minimum accumulated measurements before `train()` is allowed.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Number of bootstrap trees in the forest.
    #[serde(default = "default_forest_size")]
    pub forest_size: usize,

    /// Maximum depth of each tree.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Minimum samples per leaf.
    #[serde(default = "default_min_leaf")]
    pub min_leaf: usize,

    /// Bootstrap resampling seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::MIN_TRAINING_SAMPLES,
            forest_size: defaults::FOREST_SIZE,
            max_depth: defaults::TREE_MAX_DEPTH,
            min_leaf: defaults::TREE_MIN_LEAF,
            seed: defaults::TRAINING_SEED,
        }
    }
}

fn default_min_samples() -> usize {
    defaults::MIN_TRAINING_SAMPLES
}
fn default_forest_size() -> usize {
    defaults::FOREST_SIZE
}
fn default_max_depth() -> usize {
    defaults::TREE_MAX_DEPTH
}
fn default_min_leaf() -> usize {
    defaults::TREE_MIN_LEAF
}
fn default_seed() -> u64 {
    defaults::TRAINING_SEED
}

/// Prediction blend policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictionConfig {
    /// Which sub-model(s) the facade consults.
    #[serde(default)]
    pub strategy: BlendStrategy,
}

/// Artifact persistence locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the persisted regressor artifact.
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::MODELS_DIR),
        }
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from(defaults::MODELS_DIR)
}

impl EngineConfig {
    /// Load configuration using the standard search order, falling back to
    /// defaults (with a warning) on a missing or unparseable file.
    pub fn load() -> EngineConfig {
        if let Ok(path) = std::env::var("PERMATECH_CONFIG") {
            return Self::load_from_file(Path::new(&path));
        }
        let local = Path::new("permatech.toml");
        if local.exists() {
            return Self::load_from_file(local);
        }
        info!("No permatech.toml found — using built-in defaults");
        EngineConfig::default()
    }

    /// Load from a specific TOML file, falling back to defaults on error.
    pub fn load_from_file(path: &Path) -> EngineConfig {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<EngineConfig>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded engine configuration");
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse config — using defaults"
                    );
                    EngineConfig::default()
                }
            },
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config — using defaults"
                );
                EngineConfig::default()
            }
        }
    }

    /// Full path of the persisted regressor artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.models.dir.join(defaults::ARTIFACT_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.training.min_samples, defaults::MIN_TRAINING_SAMPLES);
        assert_eq!(config.training.forest_size, defaults::FOREST_SIZE);
        assert_eq!(config.prediction.strategy, BlendStrategy::PhysicalMlAverage);
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("models").join("temperature_regressor.json")
        );
    }

    #[test]
    fn test_partial_toml_fills_missing_fields() {
        let config: EngineConfig = toml::from_str(
            r#"
            [training]
            min_samples = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.training.min_samples, 10);
        assert_eq!(config.training.forest_size, defaults::FOREST_SIZE);
        assert_eq!(config.prediction.strategy, BlendStrategy::PhysicalMlAverage);
    }

    #[test]
    fn test_strategy_from_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            [prediction]
            strategy = "physical-only"

            [models]
            dir = "artifacts"
            "#,
        )
        .unwrap();
        assert_eq!(config.prediction.strategy, BlendStrategy::PhysicalOnly);
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("artifacts").join("temperature_regressor.json")
        );
    }

    #[test]
    fn test_unparseable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not [valid toml ===").expect("write");
        let config = EngineConfig::load_from_file(&path);
        assert_eq!(config.training.min_samples, defaults::MIN_TRAINING_SAMPLES);
    }
}
