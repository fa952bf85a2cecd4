pub mod analysis_pipeline;
pub mod calibration_store;

pub use analysis_pipeline::{output_name, AnalysisOutcome, AnalysisPipeline};
pub use calibration_store::{
    CalibrationRepository, CalibrationService, InMemoryRepository, JsonFileRepository,
};
