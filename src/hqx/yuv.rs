//! Color similarity in the hq2x YUV space.
//!
//! The transform is the one hq2x has always used. It is not a broadcast YUV:
//! it is a cheap integer approximation whose only job is to feed the
//! per-channel tolerance test in [`Yuv::is_similar`].

use crate::color::Pixel;
use rayon::prelude::*;

/// Largest luma difference still considered the same color.
pub const Y_THRESHOLD: i32 = 48;
/// Largest U difference still considered the same color.
pub const U_THRESHOLD: i32 = 7;
/// Largest V difference still considered the same color.
pub const V_THRESHOLD: i32 = 6;

/// Number of entries in a full 24-bit lookup table.
const TABLE_LEN: usize = 1 << 24;

/// A color in hq2x YUV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Yuv {
    pub y: i32,
    pub u: i32,
    pub v: i32,
}

impl Yuv {
    pub const fn new(y: i32, u: i32, v: i32) -> Self {
        Self { y, u, v }
    }

    /// Returns true when no channel differs by more than its threshold.
    ///
    /// The bounds are inclusive: a difference of exactly 48/7/6 is similar.
    pub fn is_similar(self, other: Yuv) -> bool {
        (self.y - other.y).abs() <= Y_THRESHOLD
            && (self.u - other.u).abs() <= U_THRESHOLD
            && (self.v - other.v).abs() <= V_THRESHOLD
    }
}

/// Free-function form of [`Yuv::is_similar`].
pub fn is_similar(a: Yuv, b: Yuv) -> bool {
    a.is_similar(b)
}

/// Convert a pixel to hq2x YUV. Alpha is ignored.
///
/// All shifts are arithmetic on signed values, so `r - b` below zero rounds
/// toward negative infinity.
pub fn rgb_to_yuv(pixel: Pixel) -> Yuv {
    let r = pixel.r as i32;
    let g = pixel.g as i32;
    let b = pixel.b as i32;

    Yuv {
        y: (r + g + b) >> 2,
        u: 128 + ((r - b) >> 2),
        v: 128 + ((-r + 2 * g - b) >> 3),
    }
}

/// Every 24-bit color mapped to its YUV triple.
///
/// All three components land in `0..=191`, so each entry packs into bytes.
pub struct YuvTable {
    entries: Box<[[u8; 3]]>,
}

impl YuvTable {
    /// Build the full table. This touches 16M entries and is split across the
    /// rayon pool.
    pub fn build() -> Self {
        log::debug!("building {} entry YUV table", TABLE_LEN);
        let mut entries = vec![[0u8; 3]; TABLE_LEN].into_boxed_slice();
        entries.par_iter_mut().enumerate().for_each(|(rgb, slot)| {
            let yuv = rgb_to_yuv(Pixel::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8));
            *slot = [yuv.y as u8, yuv.u as u8, yuv.v as u8];
        });
        Self { entries }
    }

    pub fn lookup(&self, pixel: Pixel) -> Yuv {
        let [y, u, v] = self.entries[pixel.rgb24() as usize];
        Yuv::new(y as i32, u as i32, v as i32)
    }
}

impl std::fmt::Debug for YuvTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YuvTable").field("entries", &self.entries.len()).finish()
    }
}

/// Source of YUV values for the classifier.
///
/// Both variants produce identical results; the table trades 48 MiB of memory
/// for skipping the arithmetic on large images.
#[derive(Debug, Default)]
pub enum YuvConverter {
    #[default]
    Direct,
    Table(YuvTable),
}

impl YuvConverter {
    /// Converter that computes every value on demand.
    pub fn direct() -> Self {
        YuvConverter::Direct
    }

    /// Converter backed by a freshly built [`YuvTable`].
    pub fn precomputed() -> Self {
        YuvConverter::Table(YuvTable::build())
    }

    pub fn is_precomputed(&self) -> bool {
        matches!(self, YuvConverter::Table(_))
    }

    pub fn to_yuv(&self, pixel: Pixel) -> Yuv {
        match self {
            YuvConverter::Direct => rgb_to_yuv(pixel),
            YuvConverter::Table(table) => table.lookup(pixel),
        }
    }

    /// Returns true when `a` and `b` count as different colors.
    pub fn differ(&self, a: Pixel, b: Pixel) -> bool {
        a.rgb24() != b.rgb24() && !self.to_yuv(a).is_similar(self.to_yuv(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_yuv_black_and_white() {
        assert_eq!(rgb_to_yuv(Pixel::BLACK), Yuv::new(0, 128, 128));
        // (765 >> 2) = 191, (0 >> 2) = 0, (0 >> 3) = 0
        assert_eq!(rgb_to_yuv(Pixel::WHITE), Yuv::new(191, 128, 128));
    }

    #[test]
    fn test_rgb_to_yuv_negative_shifts_round_down() {
        // r - b = -1 shifts to -1, not 0
        assert_eq!(rgb_to_yuv(Pixel::rgb(0, 0, 1)).u, 127);
        // -r + 2g - b = -255 >> 3 = -32
        assert_eq!(rgb_to_yuv(Pixel::rgb(255, 0, 0)), Yuv::new(63, 191, 96));
        // -r + 2g - b = -1 >> 3 = -1
        assert_eq!(rgb_to_yuv(Pixel::rgb(1, 0, 0)).v, 127);
    }

    #[test]
    fn test_rgb_to_yuv_ignores_alpha() {
        assert_eq!(
            rgb_to_yuv(Pixel::rgba(10, 200, 30, 0)),
            rgb_to_yuv(Pixel::rgba(10, 200, 30, 255))
        );
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let base = Yuv::new(100, 128, 128);
        assert!(is_similar(base, Yuv::new(148, 135, 134)));
        assert!(is_similar(base, Yuv::new(52, 121, 122)));
        assert!(!is_similar(base, Yuv::new(149, 135, 134)));
        assert!(!is_similar(base, Yuv::new(148, 136, 134)));
        assert!(!is_similar(base, Yuv::new(148, 135, 135)));
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = Yuv::new(10, 130, 120);
        let b = Yuv::new(58, 123, 126);
        assert_eq!(a.is_similar(b), b.is_similar(a));
        assert!(a.is_similar(b));
    }

    #[test]
    fn test_differ_on_pixels() {
        let yuv = YuvConverter::direct();
        assert!(!yuv.differ(Pixel::WHITE, Pixel::WHITE));
        assert!(!yuv.differ(Pixel::rgb(100, 100, 100), Pixel::rgb(104, 100, 100)));
        assert!(yuv.differ(Pixel::BLACK, Pixel::WHITE));
        // Alpha never separates two colors
        assert!(!yuv.differ(Pixel::rgba(5, 5, 5, 0), Pixel::rgb(5, 5, 5)));
    }

    #[test]
    fn test_table_matches_direct_conversion() {
        let table = YuvTable::build();
        for r in (0..=255u32).step_by(5) {
            for g in (0..=255u32).step_by(7) {
                for b in (0..=255u32).step_by(3) {
                    let p = Pixel::rgb(r as u8, g as u8, b as u8);
                    assert_eq!(table.lookup(p), rgb_to_yuv(p), "mismatch at {}", p);
                }
            }
        }
        let p = Pixel::rgb(255, 255, 255);
        assert_eq!(table.lookup(p), rgb_to_yuv(p));
    }
}
