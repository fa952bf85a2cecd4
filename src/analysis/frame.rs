//! Full-frame classification pass.

use crate::analysis::buffer::PixelBuffer;
use crate::analysis::classifier::{classify, Ruleset};
use crate::models::Category;

/// Pixel counts per category, accumulated over exactly one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: [u64; 4],
}

impl CategoryCounts {
    #[inline]
    pub fn get(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    #[inline]
    fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Combined count of the three overlay categories ("värdeareal").
    pub fn value_total(&self) -> u64 {
        self.get(Category::DarkHighValue)
            + self.get(Category::MidValue)
            + self.get(Category::LowPotential)
    }

    /// Value total plus plain forest ("skogsmark").
    pub fn forest_total(&self) -> u64 {
        self.value_total() + self.get(Category::ForestBackground)
    }
}

/// Classify every pixel once, recolor matches to the legend palette in
/// place and count them. Unclassified pixels stay byte-identical, which is
/// what lets page background and UI chrome survive into the report image.
pub fn analyze_frame(buffer: &mut PixelBuffer, ruleset: &Ruleset) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    let pixels = buffer.pixel_count() as usize;

    for i in 0..pixels {
        if let Some(category) = classify(buffer.rgb_at_index(i), ruleset) {
            counts.increment(category);
            buffer.set_rgb_at_index(i, category.legend_color());
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::default_references;

    fn buffer_from_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> PixelBuffer {
        let mut data = Vec::new();
        for p in pixels {
            data.extend_from_slice(&[p[0], p[1], p[2], 255]);
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn two_by_two_fixed_threshold_scenario() {
        let mut buf = buffer_from_pixels(
            2,
            2,
            &[[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
        );
        let before = buf.clone();
        let counts = analyze_frame(&mut buf, &Ruleset::FixedThreshold);

        // Red trips the pink predicate, green is forest, blue and white
        // fall through every rule.
        assert_eq!(counts.get(Category::LowPotential), 1);
        assert_eq!(counts.get(Category::ForestBackground), 1);
        assert_eq!(counts.get(Category::MidValue), 0);
        assert_eq!(counts.get(Category::DarkHighValue), 0);

        // Classified pixels carry the legend colors.
        assert_eq!(buf.rgb_at(0, 0), Some(Category::LowPotential.legend_color()));
        assert_eq!(
            buf.rgb_at(1, 0),
            Some(Category::ForestBackground.legend_color())
        );
        // Unclassified pixels are byte-identical.
        assert_eq!(buf.rgb_at(0, 1), before.rgb_at(0, 1));
        assert_eq!(buf.rgb_at(1, 1), before.rgb_at(1, 1));
    }

    #[test]
    fn counts_match_recolored_pixels() {
        let mut buf = buffer_from_pixels(
            3,
            1,
            &[[222, 77, 131], [167, 47, 163], [84, 23, 111]],
        );
        let counts = analyze_frame(&mut buf, &Ruleset::FixedThreshold);

        assert_eq!(counts.get(Category::LowPotential), 1);
        assert_eq!(counts.get(Category::MidValue), 1);
        assert_eq!(counts.get(Category::DarkHighValue), 1);
        assert_eq!(counts.value_total(), 3);
        assert_eq!(counts.forest_total(), 3);
    }

    #[test]
    fn totals_are_consistent() {
        let mut buf = buffer_from_pixels(
            2,
            2,
            &[[0, 255, 0], [0, 255, 0], [255, 0, 0], [128, 128, 128]],
        );
        let counts = analyze_frame(&mut buf, &Ruleset::FixedThreshold);

        assert_eq!(
            counts.value_total() + counts.get(Category::ForestBackground),
            counts.forest_total()
        );
        assert!(counts.forest_total() <= buf.pixel_count());
    }

    #[test]
    fn nearest_reference_pass_recolors_reference_pixels() {
        let refs = default_references();
        let mut buf = buffer_from_pixels(
            2,
            1,
            &[refs[Category::MidValue.index()], [255, 255, 255]],
        );
        let counts = analyze_frame(
            &mut buf,
            &Ruleset::NearestReference {
                references: refs,
                tolerance: 5.0,
            },
        );

        assert_eq!(counts.get(Category::MidValue), 1);
        assert_eq!(counts.forest_total(), 1);
        assert_eq!(buf.rgb_at(0, 0), Some(Category::MidValue.legend_color()));
        // White is killed by the luminance guard, untouched.
        assert_eq!(buf.rgb_at(1, 0), Some([255, 255, 255]));
    }

    #[test]
    fn alpha_is_preserved_through_the_pass() {
        let data = vec![0, 255, 0, 42, 255, 255, 255, 7];
        let mut buf = PixelBuffer::from_rgba(2, 1, data).unwrap();
        analyze_frame(&mut buf, &Ruleset::FixedThreshold);
        assert_eq!(buf.as_bytes()[3], 42);
        assert_eq!(buf.as_bytes()[7], 7);
    }
}
