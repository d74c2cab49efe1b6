//! sprite-hq2x - Library for magnifying pixel art with the hq2x filter
//!
//! This library provides functionality to:
//! - Classify each pixel's neighborhood by perceptual (YUV) similarity
//! - Blend every source pixel into a smoothed 2x2 output block
//! - Load and save images in any format the `image` crate supports
//! - Show results in a true-color terminal
//! - Configure the command line tool through `hq2x.toml`

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod hqx;
pub mod io;
pub mod logging;
pub mod surface;
pub mod terminal;

pub use color::{Pixel, PixelMode};
pub use error::{Error, Result};
pub use hqx::{upscale, Hq2x, UpscaleOptions};
pub use surface::{Bitmap, InvalidImage, Surface, SurfaceMut};
