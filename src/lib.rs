//! Ytandel: land-cover share analysis of forest map captures.
//!
//! Takes a raster capture of a conservation-value map layer, classifies
//! every pixel into value categories, and produces a report image with a
//! legend table of area shares.

pub mod analysis;
pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
