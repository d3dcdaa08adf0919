//! Lithology normalization
//!
//! Borehole logs arrive with free-text soil descriptions in mixed Russian
//! and English ("суглинок тугопластичный", "Песок мелкий", "мох/ПРС").
//! [`normalize`] maps any such label onto the closed [`Lithology`] set:
//! exact canonical names first, then organic surface-cover vocabulary by
//! substring, then root-substring fallback for inflected descriptions.
//! The function is total — unresolvable labels default to clay-loam.

use crate::types::Lithology;

/// Canonical names matched exactly against the trimmed, lowercased label.
///
/// Already-normalized labels pass through unchanged, which makes
/// normalization idempotent.
const CANONICAL_TABLE: &[(&str, Lithology)] = &[
    ("peat", Lithology::Peat),
    ("clay-loam", Lithology::ClayLoam),
    ("sandy-loam", Lithology::SandyLoam),
    ("sand", Lithology::Sand),
    ("organic-surface-layer", Lithology::OrganicSurfaceLayer),
    // Field-log Russian equivalents
    ("торф", Lithology::Peat),
    ("суглинок", Lithology::ClayLoam),
    ("супесь", Lithology::SandyLoam),
    ("песок", Lithology::Sand),
];

/// Organic surface-cover vocabulary, matched by substring. The top of a log
/// usually describes the cover loosely ("мох", "почвенно-растительный слой").
const ORGANIC_KEYWORDS: &[&str] = &[
    "мох",
    "moss",
    "растит",
    "vegetation",
    "почв",
    "soil",
    "прс",
];

/// Root substrings for the four core materials, checked last. Order is
/// load-bearing: sandy-loam roots precede sand roots because
/// "супесь"/"sandy" contain the sand root.
const ROOT_TABLE: &[(&str, Lithology)] = &[
    ("супес", Lithology::SandyLoam),
    ("sandy", Lithology::SandyLoam),
    ("пес", Lithology::Sand),
    ("sand", Lithology::Sand),
    ("торф", Lithology::Peat),
    ("peat", Lithology::Peat),
    ("суглин", Lithology::ClayLoam),
    ("глин", Lithology::ClayLoam),
    ("clay", Lithology::ClayLoam),
    ("loam", Lithology::ClayLoam),
];

/// Map a raw soil label to its canonical lithology.
///
/// Total and deterministic: `None`, empty, and unresolvable labels all map
/// to [`Lithology::ClayLoam`]. Matching is case-insensitive on the trimmed
/// label.
pub fn normalize(raw: Option<&str>) -> Lithology {
    let label = match raw {
        Some(s) => s.trim().to_lowercase(),
        None => return Lithology::default(),
    };
    if label.is_empty() {
        return Lithology::default();
    }

    for &(name, lithology) in CANONICAL_TABLE {
        if label == name {
            return lithology;
        }
    }

    for keyword in ORGANIC_KEYWORDS {
        if label.contains(keyword) {
            return Lithology::OrganicSurfaceLayer;
        }
    }

    for &(root, lithology) in ROOT_TABLE {
        if label.contains(root) {
            return lithology;
        }
    }

    Lithology::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_empty_default_to_clay_loam() {
        assert_eq!(normalize(None), Lithology::ClayLoam);
        assert_eq!(normalize(Some("")), Lithology::ClayLoam);
        assert_eq!(normalize(Some("   ")), Lithology::ClayLoam);
    }

    #[test]
    fn test_canonical_names_pass_through() {
        assert_eq!(normalize(Some("peat")), Lithology::Peat);
        assert_eq!(normalize(Some("clay-loam")), Lithology::ClayLoam);
        assert_eq!(normalize(Some("sandy-loam")), Lithology::SandyLoam);
        assert_eq!(normalize(Some("sand")), Lithology::Sand);
        assert_eq!(
            normalize(Some("organic-surface-layer")),
            Lithology::OrganicSurfaceLayer
        );
    }

    #[test]
    fn test_russian_field_log_labels() {
        assert_eq!(normalize(Some("торф")), Lithology::Peat);
        assert_eq!(normalize(Some("Суглинок")), Lithology::ClayLoam);
        assert_eq!(normalize(Some("супесь")), Lithology::SandyLoam);
        assert_eq!(normalize(Some("песок мелкий")), Lithology::Sand);
    }

    #[test]
    fn test_inflected_descriptions_resolve_via_roots() {
        assert_eq!(
            normalize(Some("суглинок тугопластичный")),
            Lithology::ClayLoam
        );
        assert_eq!(normalize(Some("глина полутвёрдая")), Lithology::ClayLoam);
        assert_eq!(normalize(Some("супесь пластичная")), Lithology::SandyLoam);
        assert_eq!(normalize(Some("торфяной слой")), Lithology::Peat);
    }

    #[test]
    fn test_sandy_loam_wins_over_sand() {
        // "sandy loam" contains "sand"; the sandy-loam root must win.
        assert_eq!(normalize(Some("sandy loam, wet")), Lithology::SandyLoam);
        assert_eq!(normalize(Some("пылеватая супесь")), Lithology::SandyLoam);
    }

    #[test]
    fn test_organic_cover_vocabulary() {
        assert_eq!(normalize(Some("мох")), Lithology::OrganicSurfaceLayer);
        assert_eq!(
            normalize(Some("растительный слой")),
            Lithology::OrganicSurfaceLayer
        );
        assert_eq!(
            normalize(Some("почвенно-растительный слой (ПРС)")),
            Lithology::OrganicSurfaceLayer
        );
        assert_eq!(
            normalize(Some("moss and vegetation")),
            Lithology::OrganicSurfaceLayer
        );
    }

    #[test]
    fn test_unknown_label_defaults() {
        assert_eq!(normalize(Some("гравий")), Lithology::ClayLoam);
        assert_eq!(normalize(Some("bedrock")), Lithology::ClayLoam);
    }

    #[test]
    fn test_idempotent_on_canonical_labels() {
        for label in [
            "peat",
            "clay-loam",
            "sandy-loam",
            "sand",
            "organic-surface-layer",
        ] {
            let first = normalize(Some(label));
            let second = normalize(Some(&first.to_string()));
            assert_eq!(first, second, "normalize not idempotent for {label}");
        }
    }
}
