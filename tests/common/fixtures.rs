//! Test fixtures: sample rasters and scratch directories.

use std::path::{Path, PathBuf};

use raster_ops::Raster;
use tempfile::TempDir;

/// A 6x4 raster with a color ramp across x, a ramp down y and varying
/// alpha, so row order and channel order both matter.
pub fn gradient() -> Raster {
    let mut raster = Raster::new(6, 4);
    for y in 0..4 {
        for x in 0..6 {
            raster.set_pixel(x, y, [(x * 50) as u8, (y * 80) as u8, 200, (255 - x * 30) as u8]);
        }
    }
    raster
}

/// Opaque uniform raster.
pub fn flat(width: u32, height: u32, rgb: [u8; 3]) -> Raster {
    Raster::filled(width, height, [rgb[0], rgb[1], rgb[2], 255])
}

/// Scratch directory that lives as long as the returned guard.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `raster` under `name` and return its path.
    pub fn write_image(&self, name: &str, raster: &Raster) -> PathBuf {
        let path = self.file(name);
        tga_edit::codec::save(&path, raster).expect("save fixture image");
        path
    }

    pub fn write_text(&self, name: &str, text: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, text).expect("write fixture text");
        path
    }
}
