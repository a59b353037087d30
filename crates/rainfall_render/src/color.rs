//! RGBA colors

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Linear RGBA color with premultiplied alpha, each channel 0.0-1.0
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from premultiplied RGBA channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Fade every channel (alpha included) by `factor`
    ///
    /// With premultiplied alpha this is how a color is made translucent.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a * factor)
    }

    /// Channels as an array (for GPU upload)
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Dark blue (0, 0, 139)
    pub const DARK_BLUE: Self = Self::new(0.0, 0.0, 139.0 / 255.0, 1.0);

    /// Light blue (173, 216, 230)
    pub const LIGHT_BLUE: Self = Self::new(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0);
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}
