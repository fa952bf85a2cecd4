//! Report sheet rendering: bitmap font, rasterizer, layout and PNG output.

pub mod canvas;
pub mod encode;
pub mod font;
pub mod report;

pub use encode::encode_png;
pub use report::{compose_report, legend_rows, output_size, pct};
