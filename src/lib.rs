//! Permatech: Permafrost Ground-Temperature Prediction
//!
//! Estimates soil temperature at depth for permafrost site investigations,
//! for geotechnical engineers reviewing borehole thermometry logs.
//!
//! ## Architecture
//!
//! - **Lithology Normalizer**: free-text soil labels → canonical categories
//! - **Physical Model**: exponential damping of seasonal surface correction
//! - **Reference Profile**: piecewise-linear empirical baseline with
//!   surface-influence correction
//! - **Regressor**: bagged regression trees fitted incrementally on field
//!   measurements, persisted as a JSON checkpoint
//! - **Classifier**: frozen/thawed ground-state grades per soil
//! - **Engine**: session facade composing the above with a configurable
//!   blend policy
//!
//! Data flows one direction: raw inputs → normalizer → {physical model,
//! interpolator, regressor} → facade blend → classifier → presentation.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod lithology;
pub mod physics;
pub mod profile;
pub mod regressor;
pub mod types;

// Re-export engine configuration
pub use config::EngineConfig;

// Re-export commonly used types
pub use types::{
    BlendStrategy, GradedSoil, GroundParams, GroundState, Lithology, Prediction, Season,
    TemperatureGrades, TrainingSample,
};

// Re-export the facade and its outcomes
pub use engine::PermafrostEngine;
pub use error::EngineError;
pub use regressor::{TemperatureRegressor, TrainingReport};
