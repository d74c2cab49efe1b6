//! Abstract image access
//!
//! The scaler reads through [`Surface`] and writes into a [`Bitmap`], so it
//! never depends on how a particular imaging library lays out its buffers.

use crate::color::{Pixel, PixelMode};
use image::{RgbImage, RgbaImage};
use thiserror::Error;

/// Reasons an image is rejected before any scaling work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvalidImage {
    /// Width or height is zero
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
    /// The doubled dimensions would not fit in memory indexes
    #[error("image is too large to magnify ({width}x{height})")]
    TooLarge { width: u32, height: u32 },
    /// A raw pixel buffer does not match its declared dimensions
    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    BufferSize { width: u32, height: u32, expected: usize, actual: usize },
}

/// Read access to a grid of pixels.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn mode(&self) -> PixelMode;

    /// Read the pixel at `(x, y)`.
    ///
    /// Callers keep coordinates in bounds; implementations may panic otherwise.
    fn get(&self, x: u32, y: u32) -> Pixel;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Copy into an `image` buffer with alpha.
    fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| self.get(x, y).into())
    }

    /// Copy into an `image` buffer without alpha.
    fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| self.get(x, y).into())
    }
}

/// Write access to a grid of pixels.
pub trait SurfaceMut: Surface {
    fn set(&mut self, x: u32, y: u32, pixel: Pixel);
}

/// Owned, row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    mode: PixelMode,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Create a bitmap filled with `fill`.
    ///
    /// In RGB mode the fill color is forced opaque.
    pub fn new(width: u32, height: u32, mode: PixelMode, fill: Pixel) -> Self {
        let fill = if mode.has_alpha() { fill } else { fill.opaque() };
        Self { width, height, mode, pixels: vec![fill; width as usize * height as usize] }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(
        width: u32,
        height: u32,
        mode: PixelMode,
        pixels: Vec<Pixel>,
    ) -> Result<Self, InvalidImage> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(InvalidImage::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let pixels = if mode.has_alpha() {
            pixels
        } else {
            pixels.into_iter().map(Pixel::opaque).collect()
        };
        Ok(Self { width, height, mode, pixels })
    }

    /// Build a bitmap by evaluating `f` at every coordinate.
    pub fn from_fn(
        width: u32,
        height: u32,
        mode: PixelMode,
        mut f: impl FnMut(u32, u32) -> Pixel,
    ) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let p = f(x, y);
                pixels.push(if mode.has_alpha() { p } else { p.opaque() });
            }
        }
        Self { width, height, mode, pixels }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn mode(&self) -> PixelMode {
        self.mode
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }
}

impl SurfaceMut for Bitmap {
    fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let i = self.index(x, y);
        self.pixels[i] = if self.mode.has_alpha() { pixel } else { pixel.opaque() };
    }
}

impl Surface for RgbaImage {
    fn width(&self) -> u32 {
        RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbaImage::height(self)
    }

    fn mode(&self) -> PixelMode {
        PixelMode::Rgba
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        (*self.get_pixel(x, y)).into()
    }
}

impl Surface for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn mode(&self) -> PixelMode {
        PixelMode::Rgb
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        (*self.get_pixel(x, y)).into()
    }
}
