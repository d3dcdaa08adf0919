//! Core types for ground-temperature prediction
//!
//! Closed enums for lithology, season and ground state replace the free-text
//! dictionary keys used in early field-log tooling. Every encode/decode path
//! is an exhaustive match, so an unnormalized label can never silently land
//! in an arbitrary category.

use serde::{Deserialize, Serialize};

// ============================================================================
// Lithology
// ============================================================================

/// Canonical soil/rock category affecting thermal properties.
///
/// Raw borehole-log labels are mapped onto this closed set by
/// [`crate::lithology::normalize`]. Unresolved labels default to `ClayLoam`,
/// the most common material in the reference logs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum Lithology {
    Peat,
    #[default]
    ClayLoam,
    SandyLoam,
    Sand,
    OrganicSurfaceLayer,
}

impl Lithology {
    /// Numeric feature encoding for the regression component.
    ///
    /// Stable across releases — persisted checkpoints depend on it.
    pub fn encode(self) -> f64 {
        match self {
            Lithology::Peat => 0.0,
            Lithology::ClayLoam => 1.0,
            Lithology::SandyLoam => 2.0,
            Lithology::Sand => 3.0,
            Lithology::OrganicSurfaceLayer => 4.0,
        }
    }

    /// All canonical categories, in encoding order.
    pub fn all() -> [Lithology; 5] {
        [
            Lithology::Peat,
            Lithology::ClayLoam,
            Lithology::SandyLoam,
            Lithology::Sand,
            Lithology::OrganicSurfaceLayer,
        ]
    }
}

impl std::fmt::Display for Lithology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lithology::Peat => write!(f, "peat"),
            Lithology::ClayLoam => write!(f, "clay-loam"),
            Lithology::SandyLoam => write!(f, "sandy-loam"),
            Lithology::Sand => write!(f, "sand"),
            Lithology::OrganicSurfaceLayer => write!(f, "organic-surface-layer"),
        }
    }
}

// ============================================================================
// Season
// ============================================================================

/// Season of the surface-temperature observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Parse a season label leniently. Accepts English and Russian field-log
    /// spellings; anything else is `None` (treated as zero seasonal
    /// correction downstream, by design).
    pub fn parse(raw: &str) -> Option<Season> {
        match raw.trim().to_lowercase().as_str() {
            "winter" | "зима" => Some(Season::Winter),
            "spring" | "весна" => Some(Season::Spring),
            "summer" | "лето" => Some(Season::Summer),
            "autumn" | "fall" | "осень" => Some(Season::Autumn),
            _ => None,
        }
    }

    /// Seasonal surface-temperature correction in °C, applied at the surface
    /// and attenuated exponentially with depth by the physical model.
    pub fn correction(self) -> f64 {
        match self {
            Season::Winter => -8.0,
            Season::Spring => -2.0,
            Season::Summer => 0.0,
            Season::Autumn => -4.0,
        }
    }

    /// Numeric feature encoding for the regression component.
    pub fn encode(self) -> f64 {
        match self {
            Season::Winter => 0.0,
            Season::Spring => 1.0,
            Season::Summer => 2.0,
            Season::Autumn => 3.0,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
        }
    }
}

// ============================================================================
// Ground state
// ============================================================================

/// Permafrost engineering ground-state classification.
///
/// `Undetermined` is only reachable for materials with no entry in the
/// temperature grade table (peat and organic surface cover).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GroundState {
    SolidFrozen,
    PlasticFrozen,
    Cooled,
    Thawed,
    Undetermined,
}

impl std::fmt::Display for GroundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroundState::SolidFrozen => write!(f, "solid-frozen"),
            GroundState::PlasticFrozen => write!(f, "plastic-frozen"),
            GroundState::Cooled => write!(f, "cooled"),
            GroundState::Thawed => write!(f, "thawed"),
            GroundState::Undetermined => write!(f, "undetermined"),
        }
    }
}

// ============================================================================
// Graded soils (classification key set)
// ============================================================================

/// Fine-grained soil key set of the temperature grade table.
///
/// Borehole logs distinguish sand fractions that share one canonical
/// [`Lithology`] but carry different frozen-state thresholds, so the
/// classifier keys on this finer set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GradedSoil {
    MediumSand,
    FineSand,
    SiltySand,
    SandyLoam,
    ClayLoam,
    Clay,
}

impl GradedSoil {
    /// Grade-table key for a canonical lithology. Peat and organic surface
    /// cover have no grade entry and classify as `Undetermined`.
    pub fn for_lithology(lithology: Lithology) -> Option<GradedSoil> {
        match lithology {
            Lithology::Sand => Some(GradedSoil::MediumSand),
            Lithology::SandyLoam => Some(GradedSoil::SandyLoam),
            Lithology::ClayLoam => Some(GradedSoil::ClayLoam),
            Lithology::Peat | Lithology::OrganicSurfaceLayer => None,
        }
    }
}

impl std::fmt::Display for GradedSoil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradedSoil::MediumSand => write!(f, "medium sand"),
            GradedSoil::FineSand => write!(f, "fine sand"),
            GradedSoil::SiltySand => write!(f, "silty sand"),
            GradedSoil::SandyLoam => write!(f, "sandy loam"),
            GradedSoil::ClayLoam => write!(f, "clay loam"),
            GradedSoil::Clay => write!(f, "clay"),
        }
    }
}

// ============================================================================
// Physical parameters
// ============================================================================

/// Per-lithology thermal parameters, fixed at process start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GroundParams {
    /// Thermal conductivity, W/(m·K).
    pub thermal_conductivity: f64,
    /// Characteristic depth over which seasonal surface variation
    /// attenuates by a factor of e, meters. Always > 0.
    pub damping_depth: f64,
}

impl GroundParams {
    /// Physical parameters for a canonical lithology.
    ///
    /// Exhaustive by construction — a normalized input can never miss the
    /// table, which is why collaborators must normalize before calling the
    /// physical model.
    pub fn for_lithology(lithology: Lithology) -> GroundParams {
        match lithology {
            Lithology::Peat => GroundParams {
                thermal_conductivity: 0.35,
                damping_depth: 2.5,
            },
            Lithology::ClayLoam => GroundParams {
                thermal_conductivity: 1.25,
                damping_depth: 4.0,
            },
            Lithology::SandyLoam => GroundParams {
                thermal_conductivity: 1.5,
                damping_depth: 5.0,
            },
            Lithology::Sand => GroundParams {
                thermal_conductivity: 2.0,
                damping_depth: 6.0,
            },
            // Thin insulating organic mat: conducts poorly, attenuates fast.
            Lithology::OrganicSurfaceLayer => GroundParams {
                thermal_conductivity: 0.45,
                damping_depth: 2.0,
            },
        }
    }
}

// ============================================================================
// Temperature grades
// ============================================================================

/// Frozen-state thresholds for one graded soil, °C.
///
/// `plastic_range` is stored ordered `(low, high)` with `low <= high`; both
/// ends are inclusive. The solid-frozen threshold is checked first, so
/// overlapping thresholds resolve to the colder state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureGrades {
    /// At or below this temperature the ground is solid-frozen.
    pub solid_frozen_below: f64,
    /// Inclusive plastic-frozen temperature band.
    pub plastic_range: (f64, f64),
}

// ============================================================================
// Training sample
// ============================================================================

/// One field measurement added by the operator for regressor training.
///
/// Samples are append-only for the life of the session; they are never
/// mutated or removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrainingSample {
    /// Measurement depth, meters.
    pub depth: f64,
    /// Normalized material at the measurement depth.
    pub lithology: Lithology,
    /// Surface temperature at measurement time, °C.
    pub surface_temp: f64,
    /// Season of the measurement, if recognized.
    pub season: Option<Season>,
    /// Measured ground temperature, °C.
    pub actual_temp: f64,
}

impl TrainingSample {
    /// Feature vector consumed by the regression forest.
    ///
    /// Order matters and is stable: depth, lithology code, surface
    /// temperature, season code (unrecognized season encodes as summer,
    /// the zero-correction season).
    pub fn features(&self) -> [f64; NUM_FEATURES] {
        [
            self.depth,
            self.lithology.encode(),
            self.surface_temp,
            self.season.map_or(Season::Summer.encode(), Season::encode),
        ]
    }
}

/// Number of regression input features.
pub const NUM_FEATURES: usize = 4;

// ============================================================================
// Prediction result
// ============================================================================

/// One point of a predicted temperature profile. Computed on demand,
/// never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Depth, meters.
    pub depth: f64,
    /// Material the prediction was made for.
    pub lithology: Lithology,
    /// Predicted temperature, °C.
    pub temperature: f64,
    /// Ground state at the predicted temperature.
    pub state: GroundState,
}

// ============================================================================
// Blend strategy
// ============================================================================

/// Which sub-model(s) the prediction facade consults.
///
/// `PhysicalMlAverage` is the canonical policy: the unweighted mean of two
/// independent estimators trades a little bias for variance reduction. The
/// other variants exist as named, testable strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlendStrategy {
    PhysicalOnly,
    InterpolationOnly,
    MlOnly,
    #[default]
    PhysicalMlAverage,
}
