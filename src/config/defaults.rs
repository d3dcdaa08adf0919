//! System-wide default constants.
//!
//! Centralises the tunables of the prediction engine. Every value here can
//! be overridden from `permatech.toml`; the constants double as the
//! documented defaults.

// ============================================================================
// Training
// ============================================================================

/// Minimum accumulated measurements before a regressor fit is allowed.
///
/// Observed deployments varied between 5 and 10; 5 is the documented
/// choice — a single borehole log usually yields 5+ usable readings, and
/// bagged trees degrade gracefully on small sets.
pub const MIN_TRAINING_SAMPLES: usize = 5;

/// Number of bootstrap trees in the regression forest.
pub const FOREST_SIZE: usize = 25;

/// Maximum tree depth. Four features and tens of samples saturate well
/// before this.
pub const TREE_MAX_DEPTH: usize = 8;

/// Minimum samples per leaf; splits that would leave fewer are rejected.
pub const TREE_MIN_LEAF: usize = 2;

/// Seed for bootstrap resampling. Fixed so a re-fit over identical samples
/// reproduces the same forest.
pub const TRAINING_SEED: u64 = 42;

// ============================================================================
// Persistence
// ============================================================================

/// Directory holding the persisted regressor artifact.
pub const MODELS_DIR: &str = "models";

/// Well-known artifact filename under [`MODELS_DIR`].
pub const ARTIFACT_FILENAME: &str = "temperature_regressor.json";

// ============================================================================
// Borehole log schedule
// ============================================================================

/// Standard thermometry depths (meters) used in borehole log review.
///
/// Dense through the active layer, sparser below 5 m where the profile
/// flattens.
pub const STANDARD_DEPTHS: [f64; 18] = [
    0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 14.0,
];
