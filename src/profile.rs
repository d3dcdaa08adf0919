//! Reference-profile interpolation
//!
//! Piecewise-linear interpolation over an empirically observed composite
//! depth/temperature curve, corrected for the observed surface temperature
//! by a depth-dependent influence weight. Unlike the physical model this
//! deliberately ignores lithology: the curve already averages over the
//! materials seen in the reference boreholes.

/// Empirical baseline curve: (depth m, temperature °C) samples with
/// strictly increasing depth. The first sample is the reference surface
/// observation the surface correction is computed against.
///
/// Shape follows the seasonal "trumpet": coldest around 2–3 m where winter
/// cooling still reaches, then a slow warm-up toward the geothermal trend.
pub const REFERENCE_PROFILE: &[(f64, f64)] = &[
    (0.0, -3.0),
    (0.5, -3.4),
    (1.0, -3.8),
    (1.5, -4.0),
    (2.0, -4.1),
    (3.0, -4.0),
    (4.0, -3.8),
    (5.0, -3.6),
    (7.0, -3.2),
    (10.0, -2.8),
    (12.0, -2.6),
    (14.0, -2.5),
];

/// Surface temperature of the reference profile's own surface sample, °C.
pub const REFERENCE_SURFACE_TEMP: f64 = REFERENCE_PROFILE[0].1;

/// Interpolate the baseline curve at `depth`, extrapolating linearly with
/// the nearest segment's slope outside the sampled range (no clamping).
pub fn interpolate_base(depth: f64) -> f64 {
    let profile = REFERENCE_PROFILE;
    let n = profile.len();

    // Pick the segment: the first whose right endpoint reaches `depth`,
    // or the last segment for extrapolation past the deepest sample.
    let mut seg = n - 2;
    for i in 0..n - 1 {
        if depth <= profile[i + 1].0 {
            seg = i;
            break;
        }
    }

    let (d0, t0) = profile[seg];
    let (d1, t1) = profile[seg + 1];
    let slope = (t1 - t0) / (d1 - d0);
    t0 + slope * (depth - d0)
}

/// Depth-dependent weight for propagating a surface-temperature change.
///
/// Full influence through the active layer (≤ 1 m), a linear falloff over
/// (1 m, 5 m], and a residual floor below: `max(0.1, 1 − d/10)`. The floor
/// reflects that even deep readings drift slightly with an anomalous
/// surface season; influence never fully vanishes.
pub fn surface_influence(depth: f64) -> f64 {
    if depth <= 1.0 {
        1.0
    } else if depth <= 5.0 {
        1.0 - (depth - 1.0) / 4.0
    } else {
        (1.0 - depth / 10.0).max(0.1)
    }
}

/// Predict temperature at `depth` from the reference curve, corrected for
/// the observed surface temperature. Rounded to two decimals.
pub fn interpolated_temperature(depth: f64, surface_temp: f64) -> f64 {
    debug_assert!(depth.is_finite() && depth >= 0.0, "depth must be >= 0");

    let base = interpolate_base(depth);
    let correction = (surface_temp - REFERENCE_SURFACE_TEMP) * surface_influence(depth);
    round2(base + correction)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
