//! Pixel values and pixel modes
//!
//! A [`Pixel`] is an 8-bit-per-channel color. RGB images carry an alpha of 255
//! on every pixel so the blend code only ever sees one representation.

use image::{Rgb, Rgba};
use std::fmt;

/// Pixel format of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// Opaque 24-bit color
    #[default]
    Rgb,
    /// 24-bit color plus an 8-bit alpha channel
    Rgba,
}

impl PixelMode {
    /// Returns true if pixels in this mode carry meaningful alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelMode::Rgba)
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelMode::Rgb => write!(f, "RGB"),
            PixelMode::Rgba => write!(f, "RGBA"),
        }
    }
}

/// A single 8-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Create an opaque pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a pixel with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The 24-bit `0xRRGGBB` value of this pixel, ignoring alpha.
    pub const fn rgb24(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Drop alpha, forcing the pixel opaque.
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Pixel::rgba(r, g, b, a)
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(p: Pixel) -> Self {
        Rgba(p.channels())
    }
}

impl From<Rgb<u8>> for Pixel {
    fn from(p: Rgb<u8>) -> Self {
        let [r, g, b] = p.0;
        Pixel::rgb(r, g, b)
    }
}

impl From<Pixel> for Rgb<u8> {
    fn from(p: Pixel) -> Self {
        Rgb([p.r, p.g, p.b])
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
