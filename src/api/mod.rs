pub mod analyze;
pub mod calibration;

pub use analyze::{handle_analyze, handle_report, AnalyzeParams, AnalyzeResponse};
pub use analyze::{__path_handle_analyze, __path_handle_report};
pub use calibration::{
    handle_delete_calibration, handle_get_calibration, handle_pick, handle_put_calibration,
    PickParams, PickResponse,
};
pub use calibration::{
    __path_handle_delete_calibration, __path_handle_get_calibration, __path_handle_pick,
    __path_handle_put_calibration,
};
