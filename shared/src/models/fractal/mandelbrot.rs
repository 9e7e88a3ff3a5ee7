use serde::{Deserialize, Serialize};

use crate::models::color::Color;

pub const MAX_ITERATIONS: u32 = 1000;
pub const ESCAPE_RADIUS: f64 = 2.0;
pub const ZOOM: f64 = 4.0;
pub const OFFSET_RE: f64 = 1.5;
pub const OFFSET_IM: f64 = 1.0;
/// Side of the virtual square grid pixel coordinates are mapped through.
pub const DEFAULT_GRID_SIZE: u32 = 1000;

/// Escape-time parameters for the Mandelbrot set.
///
/// A pixel `(x, y)` of a `grid_size` wide grid maps to
/// `c = (zoom * x / grid_size - offset_re) + i (zoom * y / grid_size - offset_im)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Mandelbrot {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub zoom: f64,
    pub offset_re: f64,
    pub offset_im: f64,
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            escape_radius: ESCAPE_RADIUS,
            zoom: ZOOM,
            offset_re: OFFSET_RE,
            offset_im: OFFSET_IM,
        }
    }
}

impl Mandelbrot {
    /// Iterates `z = z² + c` from zero and returns the squared real and
    /// imaginary parts of the last `z`.
    pub fn generate(&self, cr: f64, ci: f64) -> (f64, f64) {
        let limit = self.escape_radius * self.escape_radius;
        let (mut zr, mut zi, mut tr, mut ti) = (0.0, 0.0, 0.0, 0.0);

        let mut i = 0;
        while i < self.max_iterations && tr + ti <= limit {
            zi = 2.0 * zr * zi + ci;
            zr = tr - ti + cr;
            tr = zr * zr;
            ti = zi * zi;
            i += 1;
        }

        (tr, ti)
    }

    pub fn color_at(&self, x: u32, y: u32, grid_size: u32) -> Color {
        let n = grid_size as f64;
        let cr = self.zoom * x as f64 / n - self.offset_re;
        let ci = self.zoom * y as f64 / n - self.offset_im;

        let (tr, ti) = self.generate(cr, ci);
        Color::gray(intensity(tr, ti))
    }
}

/// Color of column `x`, row `y` with the default parameters.
pub fn compute_color(x: u32, y: u32, grid_size: u32) -> Color {
    Mandelbrot::default().color_at(x, y, grid_size)
}

/// Gray level derived from the final squared components.
///
/// The product is truncated to an integer and only its low byte is kept,
/// so values past 255 wrap around instead of saturating. NaN yields 0.
pub fn intensity(tr: f64, ti: f64) -> u8 {
    (tr * ti * 4.0) as i64 as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_escapes_after_two_iterations() {
        // c = -1.5 - i: |z|² goes 3.25 then 4.0625, so tr * ti * 4 = 1.
        assert_eq!(compute_color(0, 0, DEFAULT_GRID_SIZE), Color::gray(1));
    }

    #[test]
    fn center_of_the_set_never_escapes() {
        // 4 * 375 / 1000 - 1.5 == 0 and 4 * 250 / 1000 - 1 == 0, so c = 0.
        assert_eq!(compute_color(375, 250, DEFAULT_GRID_SIZE), Color::gray(0));
    }

    #[test]
    fn is_deterministic() {
        for (x, y) in [(0, 0), (17, 301), (499, 499), (511, 0), (256, 256)] {
            let first = compute_color(x, y, DEFAULT_GRID_SIZE);
            for _ in 0..8 {
                assert_eq!(compute_color(x, y, DEFAULT_GRID_SIZE), first);
            }
        }
    }

    #[test]
    fn intensity_wraps_instead_of_saturating() {
        // 10 * 10 * 4 = 400 = 256 + 144
        assert_eq!(intensity(10.0, 10.0), 144);
        assert_eq!(intensity(8.0, 8.0), 0);
        assert_eq!(intensity(0.5, 0.5), 1);
    }

    #[test]
    fn intensity_of_nan_is_zero() {
        assert_eq!(intensity(f64::NAN, 1.0), 0);
    }

    #[test]
    fn iteration_cap_stops_bounded_orbits() {
        let capped = Mandelbrot {
            max_iterations: 0,
            ..Mandelbrot::default()
        };
        assert_eq!(capped.generate(-1.5, -1.0), (0.0, 0.0));
    }

    #[test]
    fn every_pixel_is_opaque_gray() {
        for y in (0..512).step_by(37) {
            for x in (0..512).step_by(41) {
                let color = compute_color(x, y, DEFAULT_GRID_SIZE);
                assert_eq!(color.a, 255);
                assert!(color.r == color.g && color.g == color.b);
            }
        }
    }
}
