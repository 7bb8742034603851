//! Serpentine (boustrophedon) traversal.
//!
//! Even rows run left to right, odd rows right to left. Each visited pixel
//! comes with its scan direction so diffusion targets can be resolved
//! relative to it instead of through mirrored index arithmetic.

use super::kernel::Kernel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Direction used for row `y`.
    #[inline]
    pub fn for_row(y: usize) -> Self {
        if y % 2 == 0 {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        }
    }

    /// Sign applied to a kernel's "ahead" offset.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::LeftToRight => 1,
            Direction::RightToLeft => -1,
        }
    }
}

/// A pixel visited by [`serpentine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

impl ScanStep {
    /// Kernel neighbors of this pixel that lie inside `width x height`,
    /// as `(x, y, fraction)`. Targets outside the image are skipped.
    pub fn targets(
        self,
        kernel: &Kernel,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let sign = self.direction.sign();
        kernel.entries.iter().filter_map(move |&(dx, dy, weight)| {
            let tx = self.x as i64 + dx as i64 * sign;
            let ty = self.y as i64 + dy as i64;
            if tx < 0 || ty < 0 || tx >= width as i64 || ty >= height as i64 {
                return None;
            }
            Some((tx as usize, ty as usize, kernel.fraction(weight)))
        })
    }
}

/// Visit every pixel of a `width x height` image in serpentine order.
pub fn serpentine(width: usize, height: usize) -> impl Iterator<Item = ScanStep> {
    (0..height).flat_map(move |y| {
        let direction = Direction::for_row(y);
        (0..width).map(move |i| {
            let x = match direction {
                Direction::LeftToRight => i,
                Direction::RightToLeft => width - 1 - i,
            };
            ScanStep { x, y, direction }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::kernel::FLOYD_STEINBERG;

    #[test]
    fn test_serpentine_order() {
        let order: Vec<(usize, usize)> = serpentine(3, 3).map(|s| (s.x, s.y)).collect();
        assert_eq!(
            order,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1),
                (1, 1),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_serpentine_empty() {
        assert_eq!(serpentine(0, 4).count(), 0);
        assert_eq!(serpentine(4, 0).count(), 0);
    }

    #[test]
    fn test_targets_left_to_right_interior() {
        let step = ScanStep {
            x: 1,
            y: 0,
            direction: Direction::LeftToRight,
        };
        let targets: Vec<_> = step.targets(&FLOYD_STEINBERG, 3, 2).collect();
        assert_eq!(
            targets,
            vec![
                (2, 0, 0.4375),
                (2, 1, 0.0625),
                (1, 1, 0.3125),
                (0, 1, 0.1875)
            ]
        );
    }

    #[test]
    fn test_targets_mirrored_on_odd_rows() {
        let step = ScanStep {
            x: 1,
            y: 1,
            direction: Direction::RightToLeft,
        };
        let targets: Vec<_> = step.targets(&FLOYD_STEINBERG, 3, 3).collect();
        assert_eq!(
            targets,
            vec![
                (0, 1, 0.4375),
                (0, 2, 0.0625),
                (1, 2, 0.3125),
                (2, 2, 0.1875)
            ]
        );
    }

    #[test]
    fn test_targets_skip_outside_row_and_image() {
        // Last pixel of a left-to-right row on the last row: nothing ahead,
        // nothing below.
        let step = ScanStep {
            x: 2,
            y: 1,
            direction: Direction::LeftToRight,
        };
        assert_eq!(step.targets(&FLOYD_STEINBERG, 3, 2).count(), 0);

        // Row end, not last row: only below and behind-below remain.
        let step = ScanStep {
            x: 2,
            y: 0,
            direction: Direction::LeftToRight,
        };
        let targets: Vec<_> = step.targets(&FLOYD_STEINBERG, 3, 2).collect();
        assert_eq!(targets, vec![(2, 1, 0.3125), (1, 1, 0.1875)]);
    }
}
