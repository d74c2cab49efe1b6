//! 3x3 sampling around a source pixel.

use crate::color::Pixel;
use crate::surface::Surface;
use std::ops::Index;

/// A cell of the 3x3 neighborhood, in raster order.
///
/// ```text
/// TopLeft    Top    TopRight
/// Left       Center Right
/// BottomLeft Bottom BottomRight
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Left = 3,
    Center = 4,
    Right = 5,
    BottomLeft = 6,
    Bottom = 7,
    BottomRight = 8,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::Top,
        Position::TopRight,
        Position::Left,
        Position::Center,
        Position::Right,
        Position::BottomLeft,
        Position::Bottom,
        Position::BottomRight,
    ];

    /// The eight cells around the center, in pattern bit order.
    pub const NEIGHBORS: [Position; 8] = [
        Position::TopLeft,
        Position::Top,
        Position::TopRight,
        Position::Left,
        Position::Right,
        Position::BottomLeft,
        Position::Bottom,
        Position::BottomRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column and row offsets from the center, each in `-1..=1`.
    pub const fn offset(self) -> (i64, i64) {
        let i = self as i64;
        (i % 3 - 1, i / 3 - 1)
    }

    /// Bit assigned to this cell in a pattern code; `None` for the center.
    pub const fn pattern_bit(self) -> Option<u8> {
        match self {
            Position::Center => None,
            p if (p as u8) < 4 => Some(p as u8),
            p => Some(p as u8 - 1),
        }
    }
}

/// A reflection of the 3x3 grid about its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    None,
    /// Swap left and right columns
    Horizontal,
    /// Swap top and bottom rows
    Vertical,
    /// Both at once, which is a 180 degree rotation
    Both,
}

impl Mirror {
    /// The cell that lands on `pos` after reflecting.
    ///
    /// Every reflection is its own inverse, so this also maps `pos` to where
    /// it goes.
    pub const fn apply(self, pos: Position) -> Position {
        let i = pos as usize;
        let (col, row) = (i % 3, i / 3);
        let (col, row) = match self {
            Mirror::None => (col, row),
            Mirror::Horizontal => (2 - col, row),
            Mirror::Vertical => (col, 2 - row),
            Mirror::Both => (2 - col, 2 - row),
        };
        Position::ALL[row * 3 + col]
    }
}

/// The 3x3 block of source pixels centered on one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    pixels: [Pixel; 9],
}

impl Neighborhood {
    /// Wrap nine pixels given in raster order.
    pub const fn new(pixels: [Pixel; 9]) -> Self {
        Self { pixels }
    }

    /// A neighborhood where every cell holds `pixel`.
    pub const fn uniform(pixel: Pixel) -> Self {
        Self { pixels: [pixel; 9] }
    }

    /// Sample the block around `(x, y)`.
    ///
    /// Each axis is clamped independently to the image, so cells that fall
    /// outside repeat the nearest edge row or column. The image must not be
    /// empty.
    pub fn sample<S: Surface + ?Sized>(image: &S, x: i64, y: i64) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0, "sampling an empty image");
        let max_x = image.width() as i64 - 1;
        let max_y = image.height() as i64 - 1;

        let pixels = Position::ALL.map(|pos| {
            let (dx, dy) = pos.offset();
            let px = x.saturating_add(dx).clamp(0, max_x);
            let py = y.saturating_add(dy).clamp(0, max_y);
            image.get(px as u32, py as u32)
        });

        Self { pixels }
    }

    pub fn get(&self, pos: Position) -> Pixel {
        self.pixels[pos.index()]
    }

    pub fn center(&self) -> Pixel {
        self.get(Position::Center)
    }

    pub fn pixels(&self) -> &[Pixel; 9] {
        &self.pixels
    }

    /// The same block seen through a reflection.
    pub fn mirrored(&self, mirror: Mirror) -> Self {
        Self { pixels: Position::ALL.map(|pos| self.get(mirror.apply(pos))) }
    }
}

impl Index<Position> for Neighborhood {
    type Output = Pixel;

    fn index(&self, pos: Position) -> &Pixel {
        &self.pixels[pos.index()]
    }
}
