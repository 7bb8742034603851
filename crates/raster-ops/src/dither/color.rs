//! Per-channel Floyd-Steinberg over the uniform quantization levels.

use crate::quantize::UNIFORM_STEPS;
use crate::raster::{Grid, Raster, COLOR_CHANNELS};

use super::kernel::FLOYD_STEINBERG;
use super::scan::serpentine;

/// Nearest uniform level to `value` for a channel quantized in `step`s.
///
/// Candidates are the step at or below `value` (clamped to the byte range)
/// and the next step up when it still fits in a byte. Ties go to the lower
/// level.
pub fn nearest_level(value: i32, step: u8) -> u8 {
    let step = step as i32;
    let lower = value.clamp(0, 255) / step * step;
    let upper = lower + step;
    if upper <= 255 && (value - upper).abs() < (value - lower).abs() {
        upper as u8
    } else {
        lower as u8
    }
}

impl Raster {
    /// Color Floyd-Steinberg dither to the [`UNIFORM_STEPS`] levels.
    ///
    /// Each channel is diffused independently with the same kernel and
    /// serpentine order as [`Raster::dither_fs`]. The working value of a
    /// channel is its accumulated plane value times 255, truncated toward
    /// zero; the signed difference to the chosen level is the propagated error.
    pub fn dither_color(&mut self) {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let mut plane = Grid::from_raster(self, |v| v as f32 / 255.0);

        for step in serpentine(width, height) {
            let (x, y) = (step.x, step.y);
            for (c, &level_step) in UNIFORM_STEPS.iter().enumerate().take(COLOR_CHANNELS) {
                let value = (plane.get(x, y, c) * 255.0) as i32;
                let level = nearest_level(value, level_step);
                self.set_channel(x as u32, y as u32, c, level);

                let error = (value - level as i32) as f32 / 255.0;
                for (tx, ty, fraction) in step.targets(&FLOYD_STEINBERG, width, height) {
                    *plane.get_mut(tx, ty, c) += error * fraction;
                }
            }
        }
    }
}
