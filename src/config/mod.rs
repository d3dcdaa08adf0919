//! Engine Configuration Module
//!
//! Per-session configuration loaded from TOML, replacing hardcoded
//! prediction and training tunables with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `PERMATECH_CONFIG` environment variable (path to TOML file)
//! 2. `permatech.toml` in the current working directory
//! 3. Built-in defaults (matching the constants in [`defaults`])
//!
//! Unlike a global registry, the loaded [`EngineConfig`] is owned by the
//! [`crate::engine::PermafrostEngine`] session that was built from it, so
//! two sessions can run with different tunables in one process.

mod engine_config;
pub mod defaults;

pub use engine_config::{EngineConfig, ModelsConfig, PredictionConfig, TrainingConfig};
