//! hq2x magnification.
//!
//! # Algorithm Overview
//!
//! For every source pixel:
//! 1. Sample the 3x3 neighborhood, repeating edge pixels past the border
//! 2. Compare each neighbor with the center in hq2x YUV space
//! 3. Pack the comparisons into an 8-bit [`PatternCode`]
//! 4. Look the code up in the [`BlendTable`] to produce a 2x2 output block
//!
//! Flat regions come out as plain 2x2 copies. Where two neighbors on either
//! side of a diagonal agree with each other but not with the center, the
//! corner of the block is blended toward them, which rounds off staircases.
//!
//! # Example
//!
//! ```
//! use sprite_hq2x::color::{Pixel, PixelMode};
//! use sprite_hq2x::hqx::upscale;
//! use sprite_hq2x::surface::{Bitmap, Surface};
//!
//! let red = Pixel::rgb(255, 0, 0);
//! let sprite = Bitmap::new(3, 3, PixelMode::Rgb, red);
//! let scaled = upscale(&sprite).unwrap();
//!
//! assert_eq!(scaled.dimensions(), (6, 6));
//! assert!(scaled.pixels().iter().all(|&p| p == red));
//! ```

pub mod blend;
pub mod neighborhood;
pub mod pattern;
pub mod yuv;

pub use blend::{BlendTable, Quadrant};
pub use neighborhood::{Mirror, Neighborhood, Position};
pub use pattern::{classify, PatternCode};
pub use yuv::{is_similar, rgb_to_yuv, Yuv, YuvConverter, YuvTable};

pub use crate::surface::InvalidImage;

use crate::color::Pixel;
use crate::surface::{Bitmap, Surface};
use rayon::prelude::*;

/// Knobs that change how the pass runs, never what it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpscaleOptions {
    /// Split rows across the rayon pool
    pub parallel: bool,
    /// Precompute the full 24-bit YUV table before scaling
    pub yuv_table: bool,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        Self { parallel: true, yuv_table: false }
    }
}

/// An hq2x scaler: the YUV converter and blend table, built once and reused
/// across images.
#[derive(Debug, Default)]
pub struct Hq2x {
    yuv: YuvConverter,
    table: BlendTable,
    parallel: bool,
}

impl Hq2x {
    /// Scaler with default options.
    pub fn new() -> Self {
        Self::with_options(UpscaleOptions::default())
    }

    pub fn with_options(options: UpscaleOptions) -> Self {
        let yuv = if options.yuv_table { YuvConverter::precomputed() } else { YuvConverter::direct() };
        Self { yuv, table: BlendTable::new(), parallel: options.parallel }
    }

    pub fn converter(&self) -> &YuvConverter {
        &self.yuv
    }

    /// Pattern code for one neighborhood.
    pub fn classify(&self, neighborhood: &Neighborhood) -> PatternCode {
        classify(neighborhood, &self.yuv)
    }

    /// Output block for one neighborhood, in [`Quadrant::ALL`] order.
    pub fn blend(&self, pattern: PatternCode, neighborhood: &Neighborhood) -> [Pixel; 4] {
        self.table.blend(pattern, neighborhood, &self.yuv)
    }

    /// Sample, classify and blend the source pixel at `(x, y)`.
    ///
    /// Fails on an empty source.
    pub fn magnify_pixel<S: Surface + ?Sized>(
        &self,
        source: &S,
        x: u32,
        y: u32,
    ) -> Result<[Pixel; 4], InvalidImage> {
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(InvalidImage::Empty { width, height });
        }
        Ok(self.magnify_unchecked(source, x, y))
    }

    /// [`Hq2x::magnify_pixel`] for a source already known to be non-empty.
    fn magnify_unchecked<S: Surface + ?Sized>(&self, source: &S, x: u32, y: u32) -> [Pixel; 4] {
        let neighborhood = Neighborhood::sample(source, x as i64, y as i64);
        let pattern = self.classify(&neighborhood);
        self.blend(pattern, &neighborhood)
    }

    /// Magnify `source` to exactly twice its width and height.
    ///
    /// The destination keeps the source's pixel mode. Fails before doing any
    /// work if the source is empty or too large to double.
    pub fn upscale<S: Surface + Sync + ?Sized>(&self, source: &S) -> Result<Bitmap, InvalidImage> {
        let (width, height) = source.dimensions();
        validate_dimensions(width, height)?;
        log::debug!(
            "hq2x {}x{} {} -> {}x{} ({})",
            width,
            height,
            source.mode(),
            width * 2,
            height * 2,
            if self.parallel { "parallel" } else { "sequential" }
        );

        let out_width = width as usize * 2;
        let mut pixels = vec![Pixel::default(); out_width * height as usize * 2];

        // Each source row owns the two destination rows below it
        let band = out_width * 2;
        let render_band = |(y, rows): (usize, &mut [Pixel])| {
            let (upper, lower) = rows.split_at_mut(out_width);
            for x in 0..width as usize {
                let [tl, tr, bl, br] = self.magnify_unchecked(source, x as u32, y as u32);
                upper[2 * x] = tl;
                upper[2 * x + 1] = tr;
                lower[2 * x] = bl;
                lower[2 * x + 1] = br;
            }
        };

        if self.parallel {
            pixels.par_chunks_mut(band).enumerate().for_each(render_band);
        } else {
            pixels.chunks_mut(band).enumerate().for_each(render_band);
        }

        Bitmap::from_pixels(width * 2, height * 2, source.mode(), pixels)
    }
}

/// Magnify with a default [`Hq2x`] scaler.
pub fn upscale<S: Surface + Sync + ?Sized>(source: &S) -> Result<Bitmap, InvalidImage> {
    Hq2x::new().upscale(source)
}

/// Reject images the pass cannot handle.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), InvalidImage> {
    if width == 0 || height == 0 {
        return Err(InvalidImage::Empty { width, height });
    }
    let doubled = width.checked_mul(2).zip(height.checked_mul(2));
    let fits = doubled
        .and_then(|(w, h)| (w as usize).checked_mul(h as usize))
        .is_some_and(|n| n <= isize::MAX as usize / std::mem::size_of::<Pixel>());
    if !fits {
        return Err(InvalidImage::TooLarge { width, height });
    }
    Ok(())
}
