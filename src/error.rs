//! Crate-wide error type
//!
//! Each concern keeps its own error enum (`ColorError`, `ConfigError`,
//! `TemplateError`, `OutputError`); this type folds them together so callers
//! can tell a bad color list apart from a decode failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::color::ColorError;
use crate::config::ConfigError;
use crate::output::OutputError;
use crate::template::TemplateError;

/// Result type alias for palettescan operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A hex color string could not be parsed
    #[error(transparent)]
    InvalidColorFormat(#[from] ColorError),

    /// Old and new color lists differ in length
    #[error("number of old colors ({old}) must match number of new colors ({new})")]
    ReplacementSpecMismatch { old: usize, new: usize },

    /// Pixel data does not match the declared dimensions
    #[error("pixel data holds {len} pixels but {width}x{height} was declared")]
    BufferSize { width: u32, height: u32, len: usize },

    /// Image file could not be opened or decoded
    #[error("failed to load image '{}': {source}", path.display())]
    ImageLoadFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image file could not be written
    #[error("failed to save image '{}': {source}", path.display())]
    ImageSaveFailed {
        path: PathBuf,
        #[source]
        source: OutputError,
    },

    /// A derived output path points at the input image
    #[error("output '{}' would overwrite the input image; pass it with -o to do that on purpose", path.display())]
    OutputOverwritesInput { path: PathBuf },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by bad user input rather than the environment.
    ///
    /// The CLI uses this to pick between the "invalid arguments" and the
    /// generic error exit code.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidColorFormat(_)
                | Error::ReplacementSpecMismatch { .. }
                | Error::OutputOverwritesInput { .. }
                | Error::Template(_)
        )
    }
}
