//! Grey-scale RGBA8 rendering of a height grid.
//!
//! This is the byte layout a displacement shader samples: one pixel per
//! cell, row-major, with the normalized height in R, G and B and opaque alpha.

use crate::grid::{HeightGrid, HeightRange};

/// A height grid encoded as row-major RGBA pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapImage {
    /// Image width in pixels (grid columns).
    pub width: u32,
    /// Image height in pixels (grid rows).
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl HeightmapImage {
    /// Encode `grid`, mapping `range.min` to 0 and `range.max` to 255.
    ///
    /// A degenerate range encodes every cell as 0.
    pub fn from_grid(grid: &HeightGrid, range: HeightRange) -> Self {
        let size = grid.size() as u32;
        let mut pixels = Vec::with_capacity(grid.as_slice().len() * 4);
        for &h in grid.as_slice() {
            let value = (range.normalize(h) * 255.0) as u8;
            pixels.extend_from_slice(&[value, value, value, u8::MAX]);
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Grey level of the pixel at `(row, col)`, or `None` outside the image.
    pub fn level(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let index = (row as usize * self.width as usize + col as usize) * 4;
        self.pixels.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_alpha() {
        let grid = HeightGrid::from_fn(8, |r, c| (r + c) as f32).unwrap();
        let image = HeightmapImage::from_grid(&grid, grid.range());
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.pixels.len(), 8 * 8 * 4);
        assert!(image.pixels.chunks_exact(4).all(|px| px[3] == 255));
        assert!(image.pixels.chunks_exact(4).all(|px| px[0] == px[1] && px[1] == px[2]));
    }

    #[test]
    fn test_extremes_map_to_full_scale() {
        let grid = HeightGrid::from_rows(vec![vec![-2.0, 0.0], vec![3.0, 8.0]]).unwrap();
        let image = HeightmapImage::from_grid(&grid, grid.range());
        assert_eq!(image.level(0, 0), Some(0));
        assert_eq!(image.level(1, 1), Some(255));
        assert_eq!(image.level(0, 1), Some(51));
        assert_eq!(image.level(1, 0), Some(127));
    }

    #[test]
    fn test_level_outside_image_is_none() {
        let grid = HeightGrid::filled(3, 1.0).unwrap();
        let image = HeightmapImage::from_grid(&grid, grid.range());
        assert_eq!(image.level(2, 2), Some(0));
        assert_eq!(image.level(3, 0), None);
        assert_eq!(image.level(0, 3), None);
        assert_eq!(image.level(u32::MAX, u32::MAX), None);

        let truncated = HeightmapImage {
            width: 4,
            height: 4,
            pixels: vec![0; 8],
        };
        assert_eq!(truncated.level(3, 3), None);
    }

    #[test]
    fn test_flat_grid_encodes_zero() {
        let grid = HeightGrid::filled(4, 3.0).unwrap();
        let image = HeightmapImage::from_grid(&grid, grid.range());
        assert!(image.pixels.chunks_exact(4).all(|px| px[0] == 0));
    }
}
