//! Neighborhood classification into 8-bit pattern codes.

use super::neighborhood::{Mirror, Neighborhood, Position};
use super::yuv::YuvConverter;
use std::fmt;

/// Which of the eight neighbors differ from the center.
///
/// Bit layout, raster order with the center skipped:
///
/// ```text
/// 0x01 0x02 0x04
/// 0x08  --  0x10
/// 0x20 0x40 0x80
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternCode(u8);

impl PatternCode {
    /// No neighbor differs.
    pub const UNIFORM: PatternCode = PatternCode(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the neighbor at `pos` was classified as different.
    /// The center never differs from itself.
    pub fn differs(self, pos: Position) -> bool {
        pos.pattern_bit().is_some_and(|bit| self.0 & (1 << bit) != 0)
    }

    /// Mark `pos` as different.
    pub fn with(self, pos: Position) -> Self {
        match pos.pattern_bit() {
            Some(bit) => Self(self.0 | 1 << bit),
            None => self,
        }
    }

    /// The code the mirrored neighborhood would classify to.
    pub fn mirrored(self, mirror: Mirror) -> Self {
        Position::NEIGHBORS
            .iter()
            .filter(|&&pos| self.differs(mirror.apply(pos)))
            .fold(PatternCode::UNIFORM, |code, &pos| code.with(pos))
    }

    /// Test the code against a `(mask, value)` pair: the bits under `mask`
    /// must equal `value` exactly.
    pub const fn matches(self, mask: u8, value: u8) -> bool {
        self.0 & mask == value
    }
}

impl From<PatternCode> for u8 {
    fn from(code: PatternCode) -> u8 {
        code.0
    }
}

impl fmt::Display for PatternCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Classify a neighborhood.
///
/// The center is converted once; each neighbor that is not similar to it
/// sets its bit. Bits accumulate, so any combination of differing neighbors
/// is representable.
pub fn classify(neighborhood: &Neighborhood, yuv: &YuvConverter) -> PatternCode {
    let center = neighborhood.center();
    let center_yuv = yuv.to_yuv(center);

    let mut code = PatternCode::UNIFORM;
    for pos in Position::NEIGHBORS {
        let pixel = neighborhood.get(pos);
        if pixel != center && !yuv.to_yuv(pixel).is_similar(center_yuv) {
            code = code.with(pos);
        }
    }
    code
}
