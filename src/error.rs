//! Crate-level error type

use crate::config::ConfigError;
use crate::surface::InvalidImage;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between reading a sprite and writing its
/// magnified copy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The file could not be read or written
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input exists but is not an image we can decode
    #[error("cannot decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The encoder rejected the output
    #[error("cannot encode '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The image could not be written to the terminal
    #[error("cannot write to the terminal: {0}")]
    Terminal(#[source] io::Error),
    /// The image is unusable for magnification
    #[error("invalid image: {0}")]
    InvalidImage(#[from] InvalidImage),
    /// The configuration file is unreadable or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Short machine-friendly name of the error kind, used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io { .. } => "io_error",
            Error::Decode { .. } => "decode_error",
            Error::Encode { .. } => "encode_error",
            Error::Terminal(_) => "terminal_error",
            Error::InvalidImage(_) => "invalid_image",
            Error::Config(_) => "config_error",
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
