//! The hq2x interpolation table.
//!
//! hq2x decides each output quadrant independently. The published rule set is
//! symmetric under reflection, so the rules below are written once for the
//! top-left quadrant. Every other quadrant is produced by reflecting the
//! neighborhood and its pattern code until that quadrant sits top-left,
//! running the same rules, and writing the result back in place.
//!
//! In the top-left frame the rules refer to these cells:
//!
//! ```text
//! Corner Top    .
//! Left   Center Right
//! .      Bottom .
//! ```
//!
//! Rules are tried in order. A rule fires when the pattern code matches any of
//! its `(mask, value)` cases and its contrast guard, if any, holds. Guards
//! compare two neighbors with each other rather than with the center, which is
//! why blending needs the neighborhood and not only the pattern code.

use super::neighborhood::{Mirror, Neighborhood, Position};
use super::pattern::PatternCode;
use super::yuv::YuvConverter;
use crate::color::Pixel;

/// Output quadrant of the 2x2 block, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] =
        [Quadrant::TopLeft, Quadrant::TopRight, Quadrant::BottomLeft, Quadrant::BottomRight];

    /// Reflection that brings this quadrant to the top-left.
    pub const fn mirror(self) -> Mirror {
        match self {
            Quadrant::TopLeft => Mirror::None,
            Quadrant::TopRight => Mirror::Horizontal,
            Quadrant::BottomLeft => Mirror::Vertical,
            Quadrant::BottomRight => Mirror::Both,
        }
    }

    /// Column and row of this quadrant inside the 2x2 block.
    pub const fn offset(self) -> (u32, u32) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (1, 0),
            Quadrant::BottomLeft => (0, 1),
            Quadrant::BottomRight => (1, 1),
        }
    }
}

/// A cell read by a rule, in the top-left frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tap {
    Corner,
    Top,
    Left,
    Right,
    Bottom,
}

impl Tap {
    const fn position(self) -> Position {
        match self {
            Tap::Corner => Position::TopLeft,
            Tap::Top => Position::Top,
            Tap::Left => Position::Left,
            Tap::Right => Position::Right,
            Tap::Bottom => Position::Bottom,
        }
    }
}

/// How one output pixel is made from the center and its neighbors.
///
/// Weights always sum to `1 << shift`; the shift truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mix {
    /// The center pixel as is
    Copy,
    /// `(center * wc + a * wa) >> shift`
    Two { wc: u32, a: Tap, wa: u32, shift: u32 },
    /// `(center * wc + a * wa + b * wb) >> shift`
    Three { wc: u32, a: Tap, wa: u32, b: Tap, wb: u32, shift: u32 },
}

impl Mix {
    fn apply(self, nb: &Neighborhood) -> Pixel {
        let center = nb.center();
        match self {
            Mix::Copy => center,
            Mix::Two { wc, a, wa, shift } => {
                weighted(&[(center, wc), (nb.get(a.position()), wa)], shift)
            }
            Mix::Three { wc, a, wa, b, wb, shift } => weighted(
                &[(center, wc), (nb.get(a.position()), wa), (nb.get(b.position()), wb)],
                shift,
            ),
        }
    }
}

/// Weighted channel average. Alpha is mixed like any other channel.
fn weighted(parts: &[(Pixel, u32)], shift: u32) -> Pixel {
    let mut sums = [0u32; 4];
    for (pixel, weight) in parts {
        for (sum, channel) in sums.iter_mut().zip(pixel.channels()) {
            *sum += channel as u32 * weight;
        }
    }
    let [r, g, b, a] = sums.map(|s| (s >> shift) as u8);
    Pixel::rgba(r, g, b, a)
}

/// Pair of cells that must differ for a guarded rule to fire.
type Contrast = (Tap, Tap);

struct Rule {
    cases: &'static [(u8, u8)],
    guard: Option<Contrast>,
    mix: Mix,
}

const fn two(a: Tap) -> Mix {
    Mix::Two { wc: 3, a, wa: 1, shift: 2 }
}

const fn three(wc: u32, a: Tap, wa: u32, b: Tap, wb: u32, shift: u32) -> Mix {
    Mix::Three { wc, a, wa, b, wb, shift }
}

/// hq2x rules for the top-left quadrant, highest priority first.
///
/// Bits are those of [`PatternCode`]: 0x01 corner, 0x02 top, 0x04 top-right,
/// 0x08 left, 0x10 right, 0x20 bottom-left, 0x40 bottom, 0x80 bottom-right.
const RULES: &[Rule] = &[
    Rule {
        cases: &[(0xbf, 0x37), (0xdb, 0x13)],
        guard: Some((Tap::Top, Tap::Right)),
        mix: two(Tap::Left),
    },
    Rule {
        cases: &[(0xdb, 0x49), (0xef, 0x6d)],
        guard: Some((Tap::Bottom, Tap::Left)),
        mix: two(Tap::Top),
    },
    Rule {
        cases: &[(0x0b, 0x0b), (0xfe, 0x4a), (0xfe, 0x1a)],
        guard: Some((Tap::Left, Tap::Top)),
        mix: Mix::Copy,
    },
    Rule {
        cases: &[
            (0x6f, 0x2a),
            (0x5b, 0x0a),
            (0xbf, 0x3a),
            (0xdf, 0x5a),
            (0x9f, 0x8a),
            (0xcf, 0x8a),
            (0xef, 0x4e),
            (0x3f, 0x0e),
            (0xfb, 0x5a),
            (0xbb, 0x8a),
            (0x7f, 0x5a),
            (0xaf, 0x8a),
            (0xeb, 0x8a),
        ],
        guard: Some((Tap::Left, Tap::Top)),
        mix: two(Tap::Corner),
    },
    Rule { cases: &[(0x0b, 0x08)], guard: None, mix: three(2, Tap::Corner, 1, Tap::Top, 1, 2) },
    Rule { cases: &[(0x0b, 0x02)], guard: None, mix: three(2, Tap::Corner, 1, Tap::Left, 1, 2) },
    Rule { cases: &[(0x2f, 0x2f)], guard: None, mix: three(14, Tap::Left, 1, Tap::Top, 1, 4) },
    Rule {
        cases: &[(0xbf, 0x37), (0xdb, 0x13)],
        guard: None,
        mix: three(5, Tap::Top, 2, Tap::Left, 1, 3),
    },
    Rule {
        cases: &[(0xdb, 0x49), (0xef, 0x6d)],
        guard: None,
        mix: three(5, Tap::Left, 2, Tap::Top, 1, 3),
    },
    Rule {
        cases: &[(0x1b, 0x03), (0x4f, 0x43), (0x8b, 0x83), (0x6b, 0x43)],
        guard: None,
        mix: two(Tap::Left),
    },
    Rule {
        cases: &[(0x4b, 0x09), (0x8b, 0x89), (0x1f, 0x19), (0x3b, 0x19)],
        guard: None,
        mix: two(Tap::Top),
    },
    Rule {
        cases: &[(0x7e, 0x2a), (0xef, 0xab), (0xbf, 0x8f), (0x7e, 0x0e)],
        guard: None,
        mix: three(2, Tap::Left, 3, Tap::Top, 3, 3),
    },
    Rule {
        cases: &[(0xfb, 0x6a), (0x6f, 0x6e), (0x3f, 0x3e), (0xfb, 0xfa), (0xdf, 0xde), (0xdf, 0x1e)],
        guard: None,
        mix: two(Tap::Corner),
    },
    Rule {
        cases: &[
            (0x0a, 0x00),
            (0x4f, 0x4b),
            (0x9f, 0x1b),
            (0x2f, 0x0b),
            (0xbe, 0x0a),
            (0xee, 0x0a),
            (0x7e, 0x0a),
            (0xeb, 0x4b),
            (0x3b, 0x1b),
        ],
        guard: None,
        mix: three(2, Tap::Left, 1, Tap::Top, 1, 2),
    },
    // Matches every code
    Rule { cases: &[(0x00, 0x00)], guard: None, mix: three(6, Tap::Left, 1, Tap::Top, 1, 3) },
];

/// Guarded rules plus the final unconditional one.
const MAX_STEPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    guard: Option<Contrast>,
    mix: Mix,
}

/// The rules that can fire for one pattern code, in priority order.
///
/// Only the last step is unconditional; earlier ones depend on a contrast
/// test between two neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Program {
    steps: [Step; MAX_STEPS],
    len: usize,
}

impl Program {
    fn compile(code: PatternCode) -> Self {
        let mut steps = [Step { guard: None, mix: Mix::Copy }; MAX_STEPS];
        let mut len = 0;

        for rule in RULES {
            if !rule.cases.iter().any(|&(mask, value)| code.matches(mask, value)) {
                continue;
            }
            steps[len] = Step { guard: rule.guard, mix: rule.mix };
            len += 1;
            if rule.guard.is_none() {
                break;
            }
        }

        Self { steps, len }
    }

    fn run(&self, nb: &Neighborhood, yuv: &YuvConverter) -> Pixel {
        let fired = self.steps[..self.len].iter().find(|step| match step.guard {
            Some((a, b)) => yuv.differ(nb.get(a.position()), nb.get(b.position())),
            None => true,
        });
        match fired {
            Some(step) => step.mix.apply(nb),
            None => nb.center(),
        }
    }
}

/// All 256 top-left programs, compiled once from [`RULES`].
#[derive(Debug, Clone)]
pub struct BlendTable {
    programs: Box<[Program; 256]>,
}

impl Default for BlendTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendTable {
    pub fn new() -> Self {
        let programs = Box::new(std::array::from_fn(|code| {
            Program::compile(PatternCode::from_bits(code as u8))
        }));
        Self { programs }
    }

    /// Number of rules a pattern code can fall through to, guarded ones
    /// included.
    pub fn program_len(&self, code: PatternCode) -> usize {
        self.programs[code.bits() as usize].len
    }

    /// Compute the four output pixels for one source pixel.
    ///
    /// Returned in [`Quadrant::ALL`] order: top-left, top-right, bottom-left,
    /// bottom-right.
    pub fn blend(
        &self,
        pattern: PatternCode,
        neighborhood: &Neighborhood,
        yuv: &YuvConverter,
    ) -> [Pixel; 4] {
        Quadrant::ALL.map(|quadrant| {
            let mirror = quadrant.mirror();
            let code = pattern.mirrored(mirror);
            let view = neighborhood.mirrored(mirror);
            self.programs[code.bits() as usize].run(&view, yuv)
        })
    }
}
