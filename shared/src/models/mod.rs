pub mod color;
pub mod fractal;
pub mod raster;
pub mod resolution;
