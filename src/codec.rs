//! File I/O at the raster boundary.
//!
//! - `load`: decode any enabled format (Targa, PNG) into a top-to-bottom
//!   RGBA [`Raster`].
//! - `save`: encode a raster, picking the format from the file extension.
//!
//! The decoder already honors the Targa origin flag, so rasters coming out
//! of `load` are top row first regardless of how the file stored them.

use std::fs;
use std::path::Path;

use image::ExtendedColorType;
use raster_ops::Raster;

use crate::error::AppError;

/// Load an image from disk as RGBA.
pub fn load(path: &Path) -> Result<Raster, AppError> {
    let image = image::open(path)
        .map_err(|source| AppError::Codec {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let (width, height) = image.dimensions();
    let raster = Raster::from_rgba(width, height, image.into_raw())?;
    tracing::debug!(path = %path.display(), width, height, "Loaded image");
    Ok(raster)
}

/// Save a raster, creating parent directories as needed.
pub fn save(path: &Path, raster: &Raster) -> Result<(), AppError> {
    ensure_parent_dir(path)?;
    image::save_buffer(
        path,
        raster.as_bytes(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgba8,
    )
    .map_err(|source| AppError::Codec {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), width = raster.width(), height = raster.height(), "Saved image");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
