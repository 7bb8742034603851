//! Owned scratch grids for per-operation working storage.

use super::{Raster, COLOR_CHANNELS};

/// A dense `width x height x channels` array in one contiguous allocation.
///
/// Operations allocate a `Grid` on entry (padded copies, floating-point
/// planes, accumulators) and drop it before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![T::default(); width * height * channels],
        }
    }

    /// Copy the color channels of `raster` into a new grid, offset by
    /// `border` cells on every side. Border cells hold `T::default()`.
    pub fn from_raster_padded(raster: &Raster, border: usize, convert: impl Fn(u8) -> T) -> Self {
        let width = raster.width() as usize;
        let height = raster.height() as usize;
        let mut grid = Self::new(width + 2 * border, height + 2 * border, COLOR_CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let px = raster.pixel(x as u32, y as u32);
                for c in 0..COLOR_CHANNELS {
                    grid.set(x + border, y + border, c, convert(px[c]));
                }
            }
        }
        grid
    }

    /// Copy the color channels of `raster` into a new grid.
    pub fn from_raster(raster: &Raster, convert: impl Fn(u8) -> T) -> Self {
        Self::from_raster_padded(raster, 0, convert)
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, x: usize, y: usize, c: usize) -> usize {
        assert!(
            x < self.width && y < self.height && c < self.channels,
            "grid cell ({x}, {y}, {c}) outside {}x{}x{}",
            self.width,
            self.height,
            self.channels
        );
        (y * self.width + x) * self.channels + c
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> T {
        self.data[self.index(x, y, c)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: T) {
        let i = self.index(x, y, c);
        self.data[i] = value;
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, c: usize) -> &mut T {
        let i = self.index(x, y, c);
        &mut self.data[i]
    }

    /// Value at signed coordinates, or `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, x: i64, y: i64, c: usize) -> Option<T> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.get(x as usize, y as usize, c))
    }
}
