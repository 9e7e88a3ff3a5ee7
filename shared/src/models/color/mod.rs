use image::{ColorType, Rgba};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque gray where every color channel carries `intensity`.
    pub const fn gray(intensity: u8) -> Self {
        Self::new(intensity, intensity, intensity, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba(color.to_array())
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Layout of the pixels a raster hands to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorModel {
    /// Non premultiplied red, green, blue, alpha, 8 bits each.
    Rgba8,
}

impl ColorModel {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorModel::Rgba8 => 4,
        }
    }

    pub fn color_type(self) -> ColorType {
        match self {
            ColorModel::Rgba8 => ColorType::Rgba8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_is_opaque() {
        assert_eq!(Color::gray(42), Color::new(42, 42, 42, 255));
    }

    #[test]
    fn converts_to_image_pixel() {
        let pixel: Rgba<u8> = Color::new(1, 2, 3, 4).into();
        assert_eq!(pixel, Rgba([1, 2, 3, 4]));
        assert_eq!(Color::from(pixel), Color::new(1, 2, 3, 4));
    }

    #[test]
    fn rgba8_matches_image_color_type() {
        assert_eq!(
            ColorModel::Rgba8.bytes_per_pixel(),
            ColorModel::Rgba8.color_type().bytes_per_pixel() as usize
        );
    }
}
