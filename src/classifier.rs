//! Ground-state classification
//!
//! Maps a temperature and material to the standard permafrost engineering
//! states (solid-frozen, plastic-frozen, cooled, thawed). Thresholds come
//! from the per-soil temperature grade tables used in borehole log review;
//! rules are checked in a fixed order with the solid-frozen check strictly
//! first, so overlapping thresholds resolve to the colder state.

use crate::types::{GradedSoil, GroundState, Lithology, TemperatureGrades};

/// Frozen-state thresholds for a graded soil, °C.
///
/// Ranges are inclusive on both ends. Plastic ranges are stored ordered
/// `(low, high)`.
pub fn grades_for(soil: GradedSoil) -> TemperatureGrades {
    match soil {
        GradedSoil::MediumSand => TemperatureGrades {
            solid_frozen_below: -0.10,
            plastic_range: (-0.29, -0.11),
        },
        GradedSoil::FineSand => TemperatureGrades {
            solid_frozen_below: -0.30,
            plastic_range: (-0.29, -0.16),
        },
        GradedSoil::SiltySand => TemperatureGrades {
            solid_frozen_below: -0.15,
            plastic_range: (-0.29, -0.16),
        },
        GradedSoil::SandyLoam => TemperatureGrades {
            solid_frozen_below: -0.60,
            plastic_range: (-0.59, -0.21),
        },
        GradedSoil::ClayLoam => TemperatureGrades {
            solid_frozen_below: -1.00,
            plastic_range: (-0.99, -0.26),
        },
        GradedSoil::Clay => TemperatureGrades {
            solid_frozen_below: -1.50,
            plastic_range: (-1.49, -0.26),
        },
    }
}

/// Classify the ground state of a graded soil at `temp_c` °C.
///
/// Rule order: solid-frozen (inclusive threshold), plastic-frozen
/// (inclusive range), cooled (below 0), thawed. Total — never fails.
pub fn classify(temp_c: f64, soil: GradedSoil) -> GroundState {
    let grades = grades_for(soil);
    let (plastic_low, plastic_high) = grades.plastic_range;

    if temp_c <= grades.solid_frozen_below {
        GroundState::SolidFrozen
    } else if temp_c >= plastic_low && temp_c <= plastic_high {
        GroundState::PlasticFrozen
    } else if temp_c < 0.0 {
        GroundState::Cooled
    } else {
        GroundState::Thawed
    }
}

/// Classify by canonical lithology.
///
/// Peat and organic surface cover carry no grade entry and return
/// `Undetermined`.
pub fn classify_lithology(temp_c: f64, lithology: Lithology) -> GroundState {
    match GradedSoil::for_lithology(lithology) {
        Some(soil) => classify(temp_c, soil),
        None => GroundState::Undetermined,
    }
}

/// Classify directly from a raw borehole-log soil description.
///
/// Resolves the finer sand fractions ("песок мелкий", "silty sand") that
/// collapse into one canonical lithology but carry distinct thresholds.
/// Labels matching no graded soil return `Undetermined`.
pub fn classify_raw(temp_c: f64, raw_label: &str) -> GroundState {
    match graded_soil_from_label(raw_label) {
        Some(soil) => classify(temp_c, soil),
        None => GroundState::Undetermined,
    }
}

/// Resolve a raw soil description to its grade-table key.
///
/// Sand fractions are distinguished by their qualifier; bare "sand" means
/// medium sand, the default fraction in the reference logs. Clay is checked
/// after clay-loam so "суглинок" does not fall into the clay row.
pub fn graded_soil_from_label(raw_label: &str) -> Option<GradedSoil> {
    let label = raw_label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    let is_sand = label.contains("песок") || label.contains("sand");
    if is_sand && !label.contains("супес") && !label.contains("sandy") {
        if label.contains("средней") || label.contains("medium") {
            return Some(GradedSoil::MediumSand);
        }
        if label.contains("мелкий") || label.contains("fine") {
            return Some(GradedSoil::FineSand);
        }
        if label.contains("пылеват") || label.contains("silty") {
            return Some(GradedSoil::SiltySand);
        }
        return Some(GradedSoil::MediumSand);
    }

    if label.contains("супес") || label.contains("sandy") {
        return Some(GradedSoil::SandyLoam);
    }
    if label.contains("суглин") || label.contains("clay-loam") || label.contains("loam") {
        return Some(GradedSoil::ClayLoam);
    }
    if label.contains("глин") || label.contains("clay") {
        return Some(GradedSoil::Clay);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clay_loam_solid_frozen_boundary_inclusive() {
        // Threshold exactly met counts as solid-frozen.
        assert_eq!(
            classify(-1.00, GradedSoil::ClayLoam),
            GroundState::SolidFrozen
        );
        assert_eq!(
            classify(-11.2, GradedSoil::ClayLoam),
            GroundState::SolidFrozen
        );
    }

    #[test]
    fn test_clay_loam_plastic_band() {
        assert_eq!(
            classify(-0.99, GradedSoil::ClayLoam),
            GroundState::PlasticFrozen
        );
        assert_eq!(
            classify(-0.26, GradedSoil::ClayLoam),
            GroundState::PlasticFrozen
        );
        assert_eq!(
            classify(-0.50, GradedSoil::ClayLoam),
            GroundState::PlasticFrozen
        );
    }

    #[test]
    fn test_cooled_between_plastic_band_and_zero() {
        assert_eq!(classify(-0.10, GradedSoil::ClayLoam), GroundState::Cooled);
        assert_eq!(classify(-0.25, GradedSoil::ClayLoam), GroundState::Cooled);
    }

    #[test]
    fn test_thawed_at_and_above_zero() {
        assert_eq!(classify(0.0, GradedSoil::ClayLoam), GroundState::Thawed);
        assert_eq!(classify(4.5, GradedSoil::MediumSand), GroundState::Thawed);
    }

    #[test]
    fn test_solid_check_precedes_plastic_on_overlap() {
        // Fine sand: solid at ≤ -0.30 overlaps the plastic band low end
        // (-0.29 is plastic, -0.30 is solid). First match wins.
        assert_eq!(
            classify(-0.30, GradedSoil::FineSand),
            GroundState::SolidFrozen
        );
        assert_eq!(
            classify(-0.29, GradedSoil::FineSand),
            GroundState::PlasticFrozen
        );
    }

    #[test]
    fn test_classify_is_total_for_all_graded_soils() {
        let soils = [
            GradedSoil::MediumSand,
            GradedSoil::FineSand,
            GradedSoil::SiltySand,
            GradedSoil::SandyLoam,
            GradedSoil::ClayLoam,
            GradedSoil::Clay,
        ];
        for soil in soils {
            let mut t = -20.0;
            while t <= 20.0 {
                let state = classify(t, soil);
                assert_ne!(state, GroundState::Undetermined, "{soil} at {t}°C");
                t += 0.01;
            }
        }
    }

    #[test]
    fn test_ungraded_lithologies_are_undetermined() {
        assert_eq!(
            classify_lithology(-5.0, Lithology::Peat),
            GroundState::Undetermined
        );
        assert_eq!(
            classify_lithology(-5.0, Lithology::OrganicSurfaceLayer),
            GroundState::Undetermined
        );
        assert_eq!(
            classify_lithology(-5.0, Lithology::ClayLoam),
            GroundState::SolidFrozen
        );
    }

    #[test]
    fn test_raw_labels_resolve_sand_fractions() {
        assert_eq!(
            graded_soil_from_label("песок средней крупности"),
            Some(GradedSoil::MediumSand)
        );
        assert_eq!(
            graded_soil_from_label("песок мелкий"),
            Some(GradedSoil::FineSand)
        );
        assert_eq!(
            graded_soil_from_label("песок пылеватый"),
            Some(GradedSoil::SiltySand)
        );
        assert_eq!(graded_soil_from_label("супесь"), Some(GradedSoil::SandyLoam));
        assert_eq!(graded_soil_from_label("суглинок"), Some(GradedSoil::ClayLoam));
        assert_eq!(graded_soil_from_label("глина"), Some(GradedSoil::Clay));
        assert_eq!(graded_soil_from_label("торф"), None);
    }

    #[test]
    fn test_classify_raw_unknown_label_is_undetermined() {
        assert_eq!(classify_raw(-5.0, "торф"), GroundState::Undetermined);
        assert_eq!(classify_raw(-5.0, ""), GroundState::Undetermined);
        assert_eq!(classify_raw(-2.0, "глина"), GroundState::SolidFrozen);
    }

    #[test]
    fn test_grade_table_invariant_solid_at_or_below_plastic_high() {
        let soils = [
            GradedSoil::MediumSand,
            GradedSoil::FineSand,
            GradedSoil::SiltySand,
            GradedSoil::SandyLoam,
            GradedSoil::ClayLoam,
            GradedSoil::Clay,
        ];
        for soil in soils {
            let g = grades_for(soil);
            assert!(g.plastic_range.0 <= g.plastic_range.1, "{soil}");
            assert!(g.solid_frozen_below <= g.plastic_range.1, "{soil}");
        }
    }
}
