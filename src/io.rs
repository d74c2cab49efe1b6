//! Loading and saving images
//!
//! Thin layer over the `image` crate that turns files into [`Bitmap`]s and
//! back. Every decodable format and pixel layout is normalized to 8-bit RGB,
//! or RGBA when the source has an alpha channel. Images can also be shown
//! directly in a true-color terminal.

use crate::color::{Pixel, PixelMode};
use crate::error::{Error, Result};
use crate::surface::{Bitmap, Surface};
use crate::terminal::write_ansi;
use image::{DynamicImage, GenericImageView, ImageError};
use std::path::Path;

/// Decode an image file.
///
/// # Errors
///
/// * [`Error::Io`] if the file cannot be opened or read
/// * [`Error::Decode`] if the contents are not a supported image
pub fn load_image(path: &Path) -> Result<Bitmap> {
    let decoded = image::open(path).map_err(|e| match e {
        ImageError::IoError(source) => Error::Io { path: path.to_path_buf(), source },
        source => Error::Decode { path: path.to_path_buf(), source },
    })?;

    let bitmap = from_dynamic(decoded)?;
    log::debug!(
        "loaded {} ({}x{} {})",
        path.display(),
        bitmap.width(),
        bitmap.height(),
        bitmap.mode()
    );
    Ok(bitmap)
}

/// Convert a decoded image into a [`Bitmap`], keeping alpha only when the
/// source has it.
pub fn from_dynamic(image: DynamicImage) -> Result<Bitmap> {
    let (width, height) = image.dimensions();
    let (mode, pixels) = if image.color().has_alpha() {
        (PixelMode::Rgba, image.to_rgba8().pixels().map(|&p| p.into()).collect::<Vec<Pixel>>())
    } else {
        (PixelMode::Rgb, image.to_rgb8().pixels().map(|&p| p.into()).collect::<Vec<Pixel>>())
    };
    Ok(Bitmap::from_pixels(width, height, mode, pixels)?)
}

/// Encode an image to `path`, choosing the format from the extension.
///
/// Parent directories are created when missing. RGB bitmaps are written
/// without an alpha channel.
///
/// # Errors
///
/// * [`Error::Io`] if a directory or the file cannot be written
/// * [`Error::Encode`] if the format is unknown or the encoder fails
pub fn save_image<S: Surface + ?Sized>(surface: &S, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
        }
    }

    let (width, height) = surface.dimensions();
    let encoded = match surface.mode() {
        PixelMode::Rgba => surface.to_rgba_image().save(path),
        PixelMode::Rgb => surface.to_rgb_image().save(path),
    };

    encoded.map_err(|e| match e {
        ImageError::IoError(source) => Error::Io { path: path.to_path_buf(), source },
        source => Error::Encode { path: path.to_path_buf(), source },
    })?;
    log::debug!("saved {} ({}x{} {})", path.display(), width, height, surface.mode());
    Ok(())
}

/// Show an image on stdout as ANSI true-color half blocks.
///
/// # Errors
///
/// * [`Error::Terminal`] if stdout cannot be written
pub fn display_image<S: Surface + ?Sized>(surface: &S) -> Result<()> {
    let stdout = std::io::stdout();
    write_ansi(surface, &mut stdout.lock()).map_err(Error::Terminal)?;
    log::debug!("displayed {}x{} {}", surface.width(), surface.height(), surface.mode());
    Ok(())
}
