//! Palettescan - Library for counting and replacing the colors of raster images
//!
//! This library provides functionality to:
//! - Build a color histogram of an image (top/least common colors, transparency)
//! - Preview and apply bulk color replacement, producing a modified copy
//! - Parse and format hex colors
//! - Generate checkerboard sprite templates

pub mod buffer;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod histogram;
pub mod output;
pub mod replace;
pub mod report;
pub mod template;

pub use buffer::PixelBuffer;
pub use color::{parse_color_list, parse_hex, to_hex, ColorError, PixelColor};
pub use error::{Error, Result};
pub use histogram::{ColorHistogram, ColorShare};
pub use replace::{apply, preview, PreviewEntry, ReplacementResult, ReplacementSpec};
