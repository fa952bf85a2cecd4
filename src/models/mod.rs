pub mod category;
pub mod config;
pub mod report;

pub use category::Category;
pub use config::{AppConfig, ProfileMode};
pub use report::ReportRow;
