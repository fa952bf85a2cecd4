//! Per-pixel color classification.
//!
//! Two interchangeable rulesets cover the two kinds of input the tool sees:
//! the fixed-threshold predicates separate the saturated overlay colors of a
//! synthetic map export, while nearest-reference matching handles washed-out
//! screen captures where those predicates stop firing.

use crate::models::Category;

/// Pixels with perceptual luminance outside this band are never classified
/// by the nearest-reference ruleset; it keeps near-white page background and
/// near-black UI chrome out of the counts.
const LUMINANCE_MIN: f32 = 15.0;
const LUMINANCE_MAX: f32 = 245.0;

/// Reference colors for the nearest-reference ruleset, indexed by
/// [`Category::index`] (priority order).
pub type References = [[u8; 3]; 4];

/// Reference set with no calibration applied.
pub fn default_references() -> References {
    let mut refs = [[0u8; 3]; 4];
    for cat in Category::PRIORITY {
        refs[cat.index()] = cat.default_reference();
    }
    refs
}

/// The active classification strategy for one analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Ruleset {
    /// Channel-relation predicates tuned for high-contrast exports.
    FixedThreshold,
    /// Minimum Euclidean RGB distance to a reference set, rejected above
    /// `tolerance`.
    NearestReference {
        references: References,
        tolerance: f32,
    },
}

/// Classify one pixel. `None` means unclassified: the pixel is left alone
/// by the recoloring pass and counts toward nothing.
pub fn classify(rgb: [u8; 3], ruleset: &Ruleset) -> Option<Category> {
    match ruleset {
        Ruleset::FixedThreshold => classify_fixed(rgb),
        Ruleset::NearestReference {
            references,
            tolerance,
        } => classify_nearest(rgb, references, *tolerance),
    }
}

/// Fixed-threshold predicates, resolved strictly dark > mid > low > forest.
/// The raw predicates overlap (a dark purple pixel can also satisfy the mid
/// rule); the priority order is the contract, not the order of checks.
fn classify_fixed(rgb: [u8; 3]) -> Option<Category> {
    let [r, g, b] = rgb.map(i32::from);

    let green = g > r && g > b && g > 120;
    let pink = r > 130 && r > g + 40 && r > b;
    let mid_purple = r > 130 && b > 130 && (r - b).abs() < 40 && r > g + 60;
    let dark_purple = b > 80 && b > g + 40 && b > r && r > g + 10;

    if dark_purple {
        Some(Category::DarkHighValue)
    } else if mid_purple {
        Some(Category::MidValue)
    } else if pink {
        Some(Category::LowPotential)
    } else if green {
        Some(Category::ForestBackground)
    } else {
        None
    }
}

/// Nearest reference color within tolerance, ties resolved by priority
/// order (strict `<` keeps the earlier, higher-value category).
fn classify_nearest(rgb: [u8; 3], references: &References, tolerance: f32) -> Option<Category> {
    let lum = luminance(rgb);
    if !(LUMINANCE_MIN..=LUMINANCE_MAX).contains(&lum) {
        return None;
    }

    let mut best: Option<(Category, f32)> = None;
    for cat in Category::PRIORITY {
        let d = rgb_distance(rgb, references[cat.index()]);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((cat, d)),
        }
    }

    match best {
        Some((cat, d)) if d <= tolerance => Some(cat),
        _ => None,
    }
}

/// Rec. 709 perceptual luminance.
#[inline]
pub fn luminance(rgb: [u8; 3]) -> f32 {
    0.2126 * rgb[0] as f32 + 0.7152 * rgb[1] as f32 + 0.0722 * rgb[2] as f32
}

/// Euclidean distance in RGB space.
#[inline]
pub fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    let dr = a[0] as f32 - b[0] as f32;
    let dg = a[1] as f32 - b[1] as f32;
    let db = a[2] as f32 - b[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn fixed(rgb: [u8; 3]) -> Option<Category> {
        classify(rgb, &Ruleset::FixedThreshold)
    }

    #[test]
    fn fixed_legend_colors_classify_as_themselves() {
        // The saturated overlay colors the predicates were tuned on.
        assert_eq!(fixed([222, 77, 131]), Some(Category::LowPotential));
        assert_eq!(fixed([167, 47, 163]), Some(Category::MidValue));
        assert_eq!(fixed([84, 23, 111]), Some(Category::DarkHighValue));
        assert_eq!(fixed([34, 139, 34]), Some(Category::ForestBackground));
    }

    #[test]
    fn fixed_two_by_two_scenario() {
        // Red satisfies the pink predicate (R>130, R>G+40, R>B), blue and
        // white satisfy nothing, pure green is forest.
        assert_eq!(fixed([255, 0, 0]), Some(Category::LowPotential));
        assert_eq!(fixed([0, 255, 0]), Some(Category::ForestBackground));
        assert_eq!(fixed([0, 0, 255]), None);
        assert_eq!(fixed([255, 255, 255]), None);
    }

    #[test]
    fn fixed_priority_dark_beats_mid() {
        // r=180, b=200: satisfies mid (|r-b|<40, r>g+60) and dark
        // (b>g+40, b>r, r>g+10) at once; dark must win.
        let px = [180, 40, 200];
        let [r, g, b] = px.map(i32::from);
        assert!(r > 130 && b > 130 && (r - b).abs() < 40 && r > g + 60);
        assert!(b > 80 && b > g + 40 && b > r && r > g + 10);
        assert_eq!(fixed(px), Some(Category::DarkHighValue));
    }

    #[test]
    fn fixed_assignment_is_mutually_exclusive() {
        // For random pixels: the winning category's predicate holds and no
        // higher-priority predicate does.
        let mut rng = StdRng::seed_from_u64(0x59_74_61);
        for _ in 0..20_000 {
            let px: [u8; 3] = [rng.gen(), rng.gen(), rng.gen()];
            let [r, g, b] = px.map(i32::from);

            let green = g > r && g > b && g > 120;
            let pink = r > 130 && r > g + 40 && r > b;
            let mid = r > 130 && b > 130 && (r - b).abs() < 40 && r > g + 60;
            let dark = b > 80 && b > g + 40 && b > r && r > g + 10;

            match fixed(px) {
                Some(Category::DarkHighValue) => assert!(dark),
                Some(Category::MidValue) => assert!(mid && !dark),
                Some(Category::LowPotential) => assert!(pink && !mid && !dark),
                Some(Category::ForestBackground) => {
                    assert!(green && !pink && !mid && !dark)
                }
                None => assert!(!green && !pink && !mid && !dark),
            }
        }
    }

    fn nearest(rgb: [u8; 3], tolerance: f32) -> Option<Category> {
        classify(
            rgb,
            &Ruleset::NearestReference {
                references: default_references(),
                tolerance,
            },
        )
    }

    #[test]
    fn nearest_exact_reference_always_matches() {
        // Distance zero, so any tolerance >= 0 must accept.
        for cat in Category::PRIORITY {
            assert_eq!(nearest(cat.default_reference(), 0.0), Some(cat));
        }
    }

    #[test]
    fn nearest_rejects_beyond_tolerance() {
        // (85,62,62) is the low-potential reference; two units off on one
        // channel is distance 2.
        assert_eq!(nearest([87, 62, 62], 1.9), None);
        assert_eq!(nearest([87, 62, 62], 2.0), Some(Category::LowPotential));
    }

    #[test]
    fn nearest_luminance_guard_rejects_chrome() {
        assert_eq!(nearest([255, 255, 255], 1000.0), None);
        assert_eq!(nearest([0, 0, 0], 1000.0), None);
        assert_eq!(nearest([10, 10, 10], 1000.0), None); // lum 10 < 15
    }

    #[test]
    fn nearest_tie_prefers_higher_value_category() {
        // Equidistant from two references: the one earlier in priority
        // order must win deterministically.
        let mut refs = default_references();
        refs[Category::MidValue.index()] = [100, 100, 96];
        refs[Category::LowPotential.index()] = [100, 100, 104];
        let ruleset = Ruleset::NearestReference {
            references: refs,
            tolerance: 10.0,
        };
        assert_eq!(
            classify([100, 100, 100], &ruleset),
            Some(Category::MidValue)
        );
    }

    #[test]
    fn nearest_calibrated_reference_overrides() {
        let mut refs = default_references();
        refs[Category::MidValue.index()] = [200, 120, 180];
        let ruleset = Ruleset::NearestReference {
            references: refs,
            tolerance: 10.0,
        };
        assert_eq!(
            classify([202, 121, 179], &ruleset),
            Some(Category::MidValue)
        );
        // The old default mid reference is now outside tolerance of every
        // remaining reference and classifies as nothing.
        assert_eq!(classify([73, 55, 67], &ruleset), None);
    }

    #[test]
    fn luminance_matches_rec709_weights() {
        assert!((luminance([255, 255, 255]) - 255.0).abs() < 0.01);
        assert!((luminance([0, 0, 0])).abs() < f32::EPSILON);
        assert!((luminance([255, 0, 0]) - 0.2126 * 255.0).abs() < 0.01);
    }

    #[test]
    fn rgb_distance_is_euclidean() {
        assert_eq!(rgb_distance([0, 0, 0], [3, 4, 0]), 5.0);
        assert_eq!(rgb_distance([10, 20, 30], [10, 20, 30]), 0.0);
    }
}
