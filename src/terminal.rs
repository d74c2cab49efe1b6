//! Terminal rendering for magnified images
//!
//! Provides ANSI escape sequence generation for displaying images with
//! true-color cells in terminal emulators that support 24-bit color.

use crate::color::Pixel;
use crate::surface::Surface;
use std::io::{self, Write};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// 256-color dark gray background used for fully transparent pixels
const TRANSPARENT_BG: &str = "\x1b[48;5;236m";

/// 256-color dark gray foreground used for fully transparent pixels
const TRANSPARENT_FG: &str = "\x1b[38;5;236m";

/// Upper half block: the foreground paints the top half of the cell
const HALF_BLOCK: char = '▀';

/// Convert a pixel to an ANSI 24-bit background escape sequence.
///
/// Transparent pixels (alpha = 0) are rendered as a dark gray background
/// to visually distinguish them from opaque colors.
///
/// # Examples
///
/// ```
/// use sprite_hq2x::color::Pixel;
/// use sprite_hq2x::terminal::color_to_ansi_bg;
///
/// assert_eq!(color_to_ansi_bg(Pixel::rgb(255, 0, 0)), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(Pixel::rgba(0, 0, 0, 0)), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(pixel: Pixel) -> String {
    if pixel.a == 0 {
        TRANSPARENT_BG.to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", pixel.r, pixel.g, pixel.b)
    }
}

/// Convert a pixel to an ANSI 24-bit foreground escape sequence.
pub fn color_to_ansi_fg(pixel: Pixel) -> String {
    if pixel.a == 0 {
        TRANSPARENT_FG.to_string()
    } else {
        format!("\x1b[38;2;{};{};{}m", pixel.r, pixel.g, pixel.b)
    }
}

/// Render an image to ANSI terminal output.
///
/// Each text cell is a "▀" (upper half block) whose foreground is the upper
/// pixel and whose background is the lower one, so one line of text shows
/// two rows of pixels. An odd last row is padded with transparent cells.
pub fn render_ansi<S: Surface + ?Sized>(image: &S) -> String {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut output = String::new();
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = image.get(x, y);
            let bottom = if y + 1 < height { image.get(x, y + 1) } else { Pixel::rgba(0, 0, 0, 0) };

            output.push_str(&color_to_ansi_bg(bottom));
            output.push_str(&color_to_ansi_fg(top));
            output.push(HALF_BLOCK);
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }

    output
}

/// Write [`render_ansi`] output to `out` and flush it.
pub fn write_ansi<S: Surface + ?Sized, W: Write>(image: &S, out: &mut W) -> io::Result<()> {
    out.write_all(render_ansi(image).as_bytes())?;
    out.flush()
}
