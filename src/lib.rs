//! tga-edit - image editing on RGBA rasters
//!
//! File I/O, pipeline configuration and operation dispatch around the
//! `raster-ops` core. This library exposes modules for integration testing.

pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::AppError;
pub use pipeline::{Operation, Pipeline};
