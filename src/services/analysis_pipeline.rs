//! The end-to-end analysis pipeline: decode, profile, classify, compose,
//! encode. Both the HTTP handlers and the CLI drive the same entry point.

use std::sync::Arc;

use crate::analysis::{
    analyze_frame, detect_contrast_profile, Calibration, CategoryCounts, PixelBuffer, Profile,
    Ruleset,
};
use crate::error::{AnalysisError, ApiError};
use crate::models::{AppConfig, ProfileMode, ReportRow};
use crate::rendering::{compose_report, encode_png, legend_rows};

/// Everything one analysis produces.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Suggested file name for the report PNG.
    pub out_name: String,
    /// The encoded report sheet.
    pub png: Vec<u8>,
    /// Legend rows, in table order.
    pub rows: Vec<ReportRow>,
    /// Which profile the classification ran with.
    pub profile: Profile,
    /// Raw per-category pixel counts.
    pub counts: CategoryCounts,
    /// Dimensions of the analyzed capture.
    pub width: u32,
    pub height: u32,
}

pub struct AnalysisPipeline {
    config: Arc<AppConfig>,
}

impl AnalysisPipeline {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Decode an uploaded image into an RGBA buffer.
    pub fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, AnalysisError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::from_rgba(width, height, rgba.into_raw())
            .ok_or(AnalysisError::UnsupportedDimensions { width, height })
    }

    /// Run the whole pipeline on one upload.
    ///
    /// `tolerance` and `profile` are per-request overrides; absent, the
    /// configured defaults apply. The calibration only affects the
    /// low-contrast ruleset.
    pub fn run(
        &self,
        bytes: &[u8],
        source_name: &str,
        calibration: &Calibration,
        tolerance: Option<f32>,
        profile: Option<ProfileMode>,
    ) -> Result<AnalysisOutcome, ApiError> {
        let mut buffer = self.decode(bytes)?;

        let profile = match profile.unwrap_or(self.config.profile) {
            ProfileMode::Auto => detect_contrast_profile(&buffer),
            ProfileMode::High => Profile::High,
            ProfileMode::Low => Profile::Low,
        };
        let ruleset = match profile {
            Profile::High => Ruleset::FixedThreshold,
            Profile::Low => Ruleset::NearestReference {
                references: calibration.effective_references(),
                tolerance: tolerance.unwrap_or(self.config.tolerance),
            },
        };

        let counts = analyze_frame(&mut buffer, &ruleset);
        let rows = legend_rows(&counts, buffer.pixel_count());

        tracing::info!(
            source = source_name,
            width = buffer.width(),
            height = buffer.height(),
            profile = profile.as_str(),
            forest_pixels = counts.forest_total(),
            value_pixels = counts.value_total(),
            "Analyzed image"
        );

        let sheet = compose_report(&buffer, &rows, source_name);
        let png = encode_png(&sheet)?;

        Ok(AnalysisOutcome {
            out_name: output_name(source_name),
            png,
            rows,
            profile,
            counts,
            width: buffer.width(),
            height: buffer.height(),
        })
    }
}

/// Report file name for a given upload name.
pub fn output_name(source_name: &str) -> String {
    format!("Areaanalys_{}.png", strip_extension(source_name))
}

/// Drop a trailing `.ext` if there is one. A lone trailing dot or a name
/// without dots is kept as is.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}
