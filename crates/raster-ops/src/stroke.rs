//! Single-disc paint primitive.

use crate::raster::Raster;

/// A filled disc with a one-pixel anti-aliased rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub radius: u32,
    pub x: u32,
    pub y: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Stroke {
    pub fn new(radius: u32, x: u32, y: u32, rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self {
            radius,
            x,
            y,
            r,
            g,
            b,
            a,
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Raster {
    /// Paint `stroke`, clipped to the raster.
    ///
    /// Pixels with squared distance up to `radius²` are overwritten with
    /// the stroke color; pixels at exactly `radius² + 1` are averaged with
    /// it, alpha included.
    pub fn paint_stroke(&mut self, stroke: &Stroke) {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        let radius = stroke.radius as i64;
        let radius_sq = radius as i128 * radius as i128;
        let color = stroke.rgba();
        let (cx, cy) = (stroke.x as i64, stroke.y as i64);

        // Offsets are limited to the part of the disc that lands on the raster.
        let dx_range = (-radius).max(-cx)..=radius.min(self.width() as i64 - 1 - cx);
        let dy_range = (-radius).max(-cy)..=radius.min(self.height() as i64 - 1 - cy);

        for dy in dy_range {
            for dx in dx_range.clone() {
                let (px, py) = ((cx + dx) as u32, (cy + dy) as u32);
                let dist_sq = dx as i128 * dx as i128 + dy as i128 * dy as i128;
                if dist_sq <= radius_sq {
                    self.set_pixel(px, py, color);
                } else if dist_sq == radius_sq + 1 {
                    let old = self.pixel(px, py);
                    let blended: [u8; 4] =
                        std::array::from_fn(|c| ((old[c] as u16 + color[c] as u16) / 2) as u8);
                    self.set_pixel(px, py, blended);
                }
            }
        }
    }
}
