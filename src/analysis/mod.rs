//! The classification engine: pixel buffers, rulesets, contrast profile
//! detection, calibration and the full-frame pass.

pub mod buffer;
pub mod calibration;
pub mod classifier;
pub mod frame;
pub mod profile;

pub use buffer::PixelBuffer;
pub use calibration::Calibration;
pub use classifier::{classify, default_references, References, Ruleset};
pub use frame::{analyze_frame, CategoryCounts};
pub use profile::{detect_contrast_profile, Profile};
