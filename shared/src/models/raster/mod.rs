//! Owned pixel grid filled by the render workers and read by the encoder.

use image::{GenericImageView, Rgba};

use crate::error::RenderResult;

use super::{
    color::{Color, ColorModel},
    resolution::Resolution,
};

/// Row-major grid of [`Color`] with dimensions fixed at construction.
///
/// Cells start out zeroed and are expected to be written exactly once by
/// the worker pool. Reading a cell before the pool has returned is allowed
/// by the type system but yields meaningless data; nothing checks it at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    resolution: Resolution,
    pixels: Vec<Color>,
}

impl RasterImage {
    pub fn new(resolution: Resolution) -> RenderResult<Self> {
        resolution.validate()?;
        Ok(Self {
            resolution,
            pixels: vec![Color::default(); resolution.pixel_count()],
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    /// `(height, width)` of the grid.
    pub fn bounds(&self) -> (u32, u32) {
        (self.resolution.height, self.resolution.width)
    }

    pub fn color_model(&self) -> ColorModel {
        ColorModel::Rgba8
    }

    /// Color at column `x`, row `y`. Panics when out of bounds.
    pub fn at(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Splits the grid into disjoint mutable rows, each tagged with its index.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [Color])> {
        self.pixels
            .chunks_exact_mut(self.resolution.width as usize)
            .enumerate()
    }

    /// Walks the grid through its [`GenericImageView`] top to bottom, left to
    /// right, and flattens it into the layout described by [`Self::color_model`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = self.resolution.pixel_count() * self.color_model().bytes_per_pixel();
        let mut bytes = Vec::with_capacity(capacity);
        for (_, _, pixel) in GenericImageView::pixels(self) {
            bytes.extend_from_slice(&pixel.0);
        }
        bytes
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.resolution.width && y < self.resolution.height,
            "pixel ({x}, {y}) is outside of a {} raster",
            self.resolution
        );
        y as usize * self.resolution.width as usize + x as usize
    }
}

impl GenericImageView for RasterImage {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.resolution.width, self.resolution.height)
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        (0, 0, self.resolution.width, self.resolution.height)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel {
        self.at(x, y).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn rejects_empty_resolution() {
        let err = RasterImage::new(Resolution::new(0, 4)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration(_)));
    }

    #[test]
    fn rows_are_disjoint_and_ordered() {
        let mut raster = RasterImage::new(Resolution::new(3, 2)).unwrap();
        for (y, row) in raster.rows_mut() {
            assert_eq!(row.len(), 3);
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Color::gray((y * 10 + x) as u8);
            }
        }

        assert_eq!(raster.at(0, 0), Color::gray(0));
        assert_eq!(raster.at(2, 0), Color::gray(2));
        assert_eq!(raster.at(1, 1), Color::gray(11));
        assert_eq!(raster.bounds(), (2, 3));
    }

    #[test]
    fn generic_view_uses_column_row_order() {
        let mut raster = RasterImage::new(Resolution::new(2, 3)).unwrap();
        if let Some((_, row)) = raster.rows_mut().nth(2) {
            row[1] = Color::new(9, 8, 7, 255);
        }

        assert_eq!(GenericImageView::dimensions(&raster), (2, 3));
        assert_eq!(raster.get_pixel(1, 2), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn bytes_follow_row_major_view_order() {
        let mut raster = RasterImage::new(Resolution::new(3, 2)).unwrap();
        for (y, row) in raster.rows_mut() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Color::new(x as u8, y as u8, 7, 255);
            }
        }

        let mut expected = Vec::new();
        for y in 0..2 {
            for x in 0..3 {
                expected.extend_from_slice(&raster.at(x, y).to_array());
            }
        }
        assert_eq!(raster.to_bytes(), expected);
    }

    #[test]
    fn bytes_follow_color_model() {
        let raster = RasterImage::new(Resolution::square(2)).unwrap();
        assert_eq!(raster.to_bytes().len(), 4 * raster.color_model().bytes_per_pixel());
    }

    #[test]
    #[should_panic]
    fn reading_outside_panics() {
        let raster = RasterImage::new(Resolution::square(1)).unwrap();
        raster.at(1, 0);
    }
}
