//! Contrast profile detection.
//!
//! Synthetic map exports carry saturated overlay colors (large per-pixel
//! channel spread); screen captures of the same layers come out washed out
//! (small spread). The average spread over a sparse sample decides which
//! ruleset to run, so the user never has to pick one.

use crate::analysis::buffer::PixelBuffer;
use serde::Serialize;
use utoipa::ToSchema;

/// Byte stride over the RGBA layout: every 40th pixel.
const SAMPLE_STRIDE_BYTES: usize = 160;

/// Average channel spread above this picks the fixed-threshold ruleset.
const SPREAD_THRESHOLD: f32 = 45.0;

/// Which classification ruleset an analysis ran with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profile {
    /// High contrast: fixed-threshold predicates.
    High,
    /// Low contrast: nearest-reference matching.
    Low,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::High => "HIGH",
            Profile::Low => "LOW",
        }
    }
}

/// Sample the buffer and decide which profile fits it.
///
/// The stride always lands on the first pixel, so a non-empty buffer yields
/// at least one sample; the divisor is still guarded.
pub fn detect_contrast_profile(buffer: &PixelBuffer) -> Profile {
    let data = buffer.as_bytes();
    let mut samples: u64 = 0;
    let mut spread_sum: u64 = 0;

    let mut i = 0;
    while i + 2 < data.len() {
        let (r, g, b) = (data[i], data[i + 1], data[i + 2]);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        spread_sum += (max - min) as u64;
        samples += 1;
        i += SAMPLE_STRIDE_BYTES;
    }

    let avg_spread = spread_sum as f32 / samples.max(1) as f32;
    if avg_spread > SPREAD_THRESHOLD {
        Profile::High
    } else {
        Profile::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_gray_is_low() {
        let buf = PixelBuffer::filled(64, 64, [128, 128, 128]);
        assert_eq!(detect_contrast_profile(&buf), Profile::Low);
    }

    #[test]
    fn saturated_overlay_is_high() {
        let buf = PixelBuffer::filled(64, 64, [222, 77, 131]);
        assert_eq!(detect_contrast_profile(&buf), Profile::High);
    }

    #[test]
    fn single_pixel_image_yields_a_sample() {
        let buf = PixelBuffer::filled(1, 1, [0, 255, 0]);
        assert_eq!(detect_contrast_profile(&buf), Profile::High);
    }

    #[test]
    fn spread_just_below_threshold_is_low() {
        // Spread is exactly 45, which is not strictly above the threshold.
        let buf = PixelBuffer::filled(16, 16, [100, 145, 100]);
        assert_eq!(detect_contrast_profile(&buf), Profile::Low);
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Profile::High).unwrap(), "\"HIGH\"");
        assert_eq!(Profile::Low.as_str(), "LOW");
    }
}
