//! Physical attenuation model
//!
//! Closed-form estimate of ground temperature at depth: the seasonal
//! surface-temperature correction decays exponentially with depth at the
//! lithology's characteristic damping depth.
//!
//!   T(d) = T_surface + C_season · exp(−d / d_damping)
//!
//! At the surface the full seasonal correction applies; as d → ∞ the
//! estimate approaches the surface temperature. No ML involved — this is
//! the deterministic fallback and one leg of the facade blend.

use crate::types::{GroundParams, Lithology, Season};

/// Seasonal correction in °C. Unrecognized seasons contribute zero
/// correction rather than failing (lenient by design).
pub fn season_correction(season: Option<Season>) -> f64 {
    season.map_or(0.0, Season::correction)
}

/// Predict temperature at `depth` meters using the attenuation model.
///
/// `lithology` must be a normalized category — the facade normalizes raw
/// labels before calling here, which is what makes the parameter lookup
/// total. Result is rounded to one decimal place, matching the resolution
/// of field thermometry logs.
///
/// `depth` must be finite and non-negative; the facade validates this.
pub fn attenuated_temperature(
    depth: f64,
    lithology: Lithology,
    surface_temp: f64,
    season: Option<Season>,
) -> f64 {
    debug_assert!(depth.is_finite() && depth >= 0.0, "depth must be >= 0");

    let params = GroundParams::for_lithology(lithology);
    let correction = season_correction(season);
    let temp = surface_temp + correction * (-depth / params.damping_depth).exp();

    round1(temp)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_clay_loam_reference_point() {
        // -5 + (-8)·exp(-1/4.0) ≈ -11.2
        let temp = attenuated_temperature(1.0, Lithology::ClayLoam, -5.0, Some(Season::Winter));
        assert_eq!(temp, -11.2);
    }

    #[test]
    fn test_surface_gets_full_seasonal_correction() {
        let temp = attenuated_temperature(0.0, Lithology::Sand, -5.0, Some(Season::Winter));
        assert_eq!(temp, -13.0);
    }

    #[test]
    fn test_summer_has_no_correction() {
        for depth in [0.0, 1.0, 5.0, 14.0] {
            let temp = attenuated_temperature(depth, Lithology::Peat, 3.5, Some(Season::Summer));
            assert_eq!(temp, 3.5);
        }
    }

    #[test]
    fn test_unknown_season_means_zero_correction() {
        let temp = attenuated_temperature(2.0, Lithology::SandyLoam, -4.0, None);
        assert_eq!(temp, -4.0);
    }

    #[test]
    fn test_correction_decays_monotonically_with_depth() {
        let mut prev_offset = f64::INFINITY;
        for depth in [0.0_f64, 0.5, 1.0, 2.0, 4.0, 8.0, 14.0] {
            let raw = -5.0 + (-8.0_f64) * (-depth / 4.0).exp();
            let offset = (raw - (-5.0)).abs();
            assert!(
                offset < prev_offset || depth == 0.0,
                "correction magnitude should shrink with depth"
            );
            prev_offset = offset;
        }
    }

    #[test]
    fn test_deep_limit_approaches_surface_temp() {
        for lith in Lithology::all() {
            let temp = attenuated_temperature(100.0, lith, -5.0, Some(Season::Winter));
            assert_eq!(temp, -5.0, "{lith}: seasonal correction should vanish at depth");
        }
    }

    #[test]
    fn test_faster_damping_in_peat_than_sand() {
        // Same inputs: peat (damping 2.5 m) sheds the winter correction
        // faster than sand (damping 6.0 m).
        let peat = attenuated_temperature(3.0, Lithology::Peat, -5.0, Some(Season::Winter));
        let sand = attenuated_temperature(3.0, Lithology::Sand, -5.0, Some(Season::Winter));
        assert!(peat > sand, "peat={peat} should be warmer than sand={sand}");
    }
}
