//! Prediction facade
//!
//! Composes the normalizer, physical model, reference-profile interpolator,
//! classifier and trainable regressor behind a single session object. The
//! engine owns the training-sample store and regressor state exclusively;
//! collaborators create one engine per session and call it synchronously —
//! every operation completes before control returns.
//!
//! Raw collaborator inputs (free-text lithology, loose season labels) are
//! normalized here, before any component with a table lookup is called.

use tracing::{debug, warn};

use crate::classifier;
use crate::config::{defaults, EngineConfig};
use crate::error::EngineError;
use crate::lithology;
use crate::physics;
use crate::profile;
use crate::regressor::{TemperatureRegressor, TrainingReport};
use crate::types::{BlendStrategy, Lithology, Prediction, Season, TrainingSample};

/// Plausible surface-temperature range, °C. Values outside are accepted but
/// logged — they usually mean a column-mapping mistake upstream.
const PLAUSIBLE_SURFACE_RANGE: (f64, f64) = (-30.0, 20.0);

/// One prediction engine session.
///
/// Construction restores a previously persisted regressor best-effort; a
/// cold start (no artifact) begins untrained and predictions fall back to
/// the physical model.
pub struct PermafrostEngine {
    config: EngineConfig,
    regressor: TemperatureRegressor,
}

impl PermafrostEngine {
    /// Build an engine from configuration, restoring any persisted
    /// regressor artifact.
    pub fn new(config: EngineConfig) -> Self {
        let regressor = TemperatureRegressor::load_or_untrained(
            config.training.clone(),
            config.artifact_path(),
        );
        Self { config, regressor }
    }

    /// Build an engine with built-in defaults (no config file).
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the regressor has a completed fit.
    pub fn is_trained(&self) -> bool {
        self.regressor.is_trained()
    }

    /// Number of accumulated field measurements.
    pub fn sample_count(&self) -> usize {
        self.regressor.sample_count()
    }

    /// Record a field measurement for later training.
    ///
    /// The raw lithology label is normalized on entry; the sample store is
    /// append-only for the life of the session.
    pub fn add_measurement(
        &mut self,
        depth: f64,
        raw_lithology: Option<&str>,
        surface_temp: f64,
        season: &str,
        actual_temp: f64,
    ) -> Result<(), EngineError> {
        validate_depth(depth)?;
        validate_temp("surface_temp", surface_temp)?;
        validate_temp("actual_temp", actual_temp)?;

        let sample = TrainingSample {
            depth,
            lithology: lithology::normalize(raw_lithology),
            surface_temp,
            season: Season::parse(season),
            actual_temp,
        };
        self.regressor.add_sample(sample);
        debug!(
            depth,
            lithology = %sample.lithology,
            actual_temp,
            count = self.regressor.sample_count(),
            "Measurement recorded"
        );
        Ok(())
    }

    /// Fit the regressor over all accumulated measurements.
    ///
    /// Recoverable failure below the configured minimum sample count; a
    /// successful fit persists the artifact (save failures are downgraded
    /// to a warning in the report).
    pub fn train(&mut self) -> Result<TrainingReport, EngineError> {
        self.regressor.train()
    }

    /// Predict temperature at depth, °C.
    ///
    /// The canonical blend: physical model always; when `use_ml` is set and
    /// the regressor is trained, the unweighted mean of physical and ML
    /// predictions, rounded to one decimal. The configured
    /// [`BlendStrategy`] can replace this with any of the named variants.
    pub fn predict_temperature(
        &self,
        depth: f64,
        raw_lithology: Option<&str>,
        surface_temp: f64,
        season: &str,
        use_ml: bool,
    ) -> Result<f64, EngineError> {
        validate_depth(depth)?;
        validate_temp("surface_temp", surface_temp)?;
        check_plausible_surface(surface_temp);

        let lith = lithology::normalize(raw_lithology);
        let season = Season::parse(season);
        Ok(self.blend(depth, lith, surface_temp, season, use_ml))
    }

    /// Predict temperature and classify the ground state at that depth.
    pub fn predict(
        &self,
        depth: f64,
        raw_lithology: Option<&str>,
        surface_temp: f64,
        season: &str,
        use_ml: bool,
    ) -> Result<Prediction, EngineError> {
        let temperature =
            self.predict_temperature(depth, raw_lithology, surface_temp, season, use_ml)?;
        let lith = lithology::normalize(raw_lithology);
        Ok(Prediction {
            depth,
            lithology: lith,
            temperature,
            state: classifier::classify_lithology(temperature, lith),
        })
    }

    /// Predict the full profile over the standard borehole log depths.
    pub fn profile_table(
        &self,
        raw_lithology: Option<&str>,
        surface_temp: f64,
        season: &str,
        use_ml: bool,
    ) -> Result<Vec<Prediction>, EngineError> {
        defaults::STANDARD_DEPTHS
            .iter()
            .map(|&depth| self.predict(depth, raw_lithology, surface_temp, season, use_ml))
            .collect()
    }

    /// Apply the configured blend strategy. `use_ml = false` demotes the
    /// ML-consulting strategies to physical-only for this call.
    fn blend(
        &self,
        depth: f64,
        lith: Lithology,
        surface_temp: f64,
        season: Option<Season>,
        use_ml: bool,
    ) -> f64 {
        let strategy = match (self.config.prediction.strategy, use_ml) {
            (BlendStrategy::PhysicalMlAverage | BlendStrategy::MlOnly, false) => {
                BlendStrategy::PhysicalOnly
            }
            (s, _) => s,
        };

        match strategy {
            BlendStrategy::PhysicalOnly => {
                physics::attenuated_temperature(depth, lith, surface_temp, season)
            }
            BlendStrategy::InterpolationOnly => {
                profile::interpolated_temperature(depth, surface_temp)
            }
            BlendStrategy::MlOnly => self.regressor.predict(depth, lith, surface_temp, season),
            BlendStrategy::PhysicalMlAverage => {
                let physical = physics::attenuated_temperature(depth, lith, surface_temp, season);
                if self.regressor.is_trained() {
                    let ml = self.regressor.predict(depth, lith, surface_temp, season);
                    round1((physical + ml) / 2.0)
                } else {
                    physical
                }
            }
        }
    }
}

fn validate_depth(depth: f64) -> Result<(), EngineError> {
    if !depth.is_finite() || depth < 0.0 {
        return Err(EngineError::InvalidInput {
            field: "depth",
            value: depth,
            reason: "must be a non-negative number of meters",
        });
    }
    Ok(())
}

fn validate_temp(field: &'static str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidInput {
            field,
            value,
            reason: "must be a finite temperature in °C",
        });
    }
    Ok(())
}

fn check_plausible_surface(surface_temp: f64) {
    let (low, high) = PLAUSIBLE_SURFACE_RANGE;
    if surface_temp < low || surface_temp > high {
        warn!(
            surface_temp,
            "Surface temperature outside plausible range ({low}..{high} °C)"
        );
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroundState;

    fn engine_in(dir: &std::path::Path) -> PermafrostEngine {
        let mut config = EngineConfig::default();
        config.models.dir = dir.to_path_buf();
        PermafrostEngine::new(config)
    }

    #[test]
    fn test_untrained_blend_is_physical_prediction() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let engine = engine_in(dir.path());
        let temp = engine
            .predict_temperature(1.0, Some("суглинок"), -5.0, "winter", true)
            .expect("predict");
        assert_eq!(temp, -11.2);
    }

    #[test]
    fn test_end_to_end_winter_clay_loam() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let engine = engine_in(dir.path());
        let prediction = engine
            .predict(1.0, Some("суглинок"), -5.0, "winter", false)
            .expect("predict");
        assert_eq!(prediction.temperature, -11.2);
        assert_eq!(prediction.lithology, Lithology::ClayLoam);
        assert_eq!(prediction.state, GroundState::SolidFrozen);
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let engine = engine_in(dir.path());
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            let result = engine.predict_temperature(bad, Some("sand"), -5.0, "winter", true);
            assert!(matches!(
                result,
                Err(EngineError::InvalidInput { field: "depth", .. })
            ));
        }
    }

    #[test]
    fn test_unrecognized_season_is_lenient() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let engine = engine_in(dir.path());
        let temp = engine
            .predict_temperature(2.0, Some("sand"), -5.0, "dry season", true)
            .expect("unknown season must not fail");
        assert_eq!(temp, -5.0);
    }

    #[test]
    fn test_blend_averages_physical_and_ml() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let mut engine = engine_in(dir.path());
        // Constant measured temperature teaches the forest a flat profile.
        for i in 0..10 {
            engine
                .add_measurement(i as f64, Some("суглинок"), -5.0, "winter", -4.0)
                .expect("add");
        }
        engine.train().expect("train");
        assert!(engine.is_trained());

        let physical = physics::attenuated_temperature(
            2.0,
            Lithology::ClayLoam,
            -5.0,
            Some(Season::Winter),
        );
        let blended = engine
            .predict_temperature(2.0, Some("суглинок"), -5.0, "winter", true)
            .expect("predict");
        let expected = ((physical + (-4.0)) / 2.0 * 10.0).round() / 10.0;
        assert_eq!(blended, expected);

        // With use_ml off the ML leg is ignored.
        let physical_only = engine
            .predict_temperature(2.0, Some("суглинок"), -5.0, "winter", false)
            .expect("predict");
        assert_eq!(physical_only, physical);
    }

    #[test]
    fn test_interpolation_only_strategy() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let mut config = EngineConfig::default();
        config.models.dir = dir.path().to_path_buf();
        config.prediction.strategy = BlendStrategy::InterpolationOnly;
        let engine = PermafrostEngine::new(config);

        let temp = engine
            .predict_temperature(0.0, Some("песок"), profile::REFERENCE_SURFACE_TEMP, "summer", true)
            .expect("predict");
        assert_eq!(temp, profile::REFERENCE_PROFILE[0].1);
    }

    #[test]
    fn test_ml_only_strategy_falls_back_when_untrained() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let mut config = EngineConfig::default();
        config.models.dir = dir.path().to_path_buf();
        config.prediction.strategy = BlendStrategy::MlOnly;
        let engine = PermafrostEngine::new(config);

        let temp = engine
            .predict_temperature(1.0, Some("clay-loam"), -5.0, "winter", true)
            .expect("predict");
        assert_eq!(temp, -11.2);
    }

    #[test]
    fn test_profile_table_covers_standard_depths() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let engine = engine_in(dir.path());
        let table = engine
            .profile_table(Some("торф"), -5.0, "autumn", true)
            .expect("profile");
        assert_eq!(table.len(), defaults::STANDARD_DEPTHS.len());
        for (row, &depth) in table.iter().zip(defaults::STANDARD_DEPTHS.iter()) {
            assert_eq!(row.depth, depth);
            assert_eq!(row.lithology, Lithology::Peat);
            // Peat has no grade entry.
            assert_eq!(row.state, GroundState::Undetermined);
        }
    }

    #[test]
    fn test_training_sample_count_visible_via_facade() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let mut engine = engine_in(dir.path());
        assert_eq!(engine.sample_count(), 0);
        engine
            .add_measurement(1.0, Some("sand"), -3.0, "spring", -2.1)
            .expect("add");
        assert_eq!(engine.sample_count(), 1);
    }

    #[test]
    fn test_insufficient_data_reported_through_facade() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let mut engine = engine_in(dir.path());
        for i in 0..4 {
            engine
                .add_measurement(i as f64, Some("sand"), -3.0, "spring", -2.0)
                .expect("add");
        }
        let err = engine.train().expect_err("too few samples");
        assert!(err.to_string().contains("4"));
    }
}
