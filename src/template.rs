//! Checkerboard sprite templates
//!
//! Produces a blank sheet divided into equal tiles that alternate between
//! two colors, used as a drawing guide for sprite sheets.

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;

/// Largest sheet accepted, in pixels (8192 x 8192)
pub const MAX_TEMPLATE_PIXELS: u64 = 1 << 26;

/// Error type for template geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A dimension was zero
    #[error("{name} must be a positive integer")]
    ZeroDimension { name: &'static str },
    /// Sheet size is not a multiple of the tile size
    #[error("{axis} {size} is not divisible by tile {axis} {tile}")]
    NotDivisible { axis: &'static str, size: u32, tile: u32 },
    /// Sheet has more pixels than [`MAX_TEMPLATE_PIXELS`]
    #[error("sheet {width}x{height} exceeds the maximum of {max} pixels")]
    TooLarge { width: u32, height: u32, max: u64 },
}

/// Sheet and tile dimensions for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TemplateSpec {
    /// Validate and build a template spec.
    pub fn new(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self, TemplateError> {
        for (name, value) in [
            ("width", width),
            ("height", height),
            ("tile width", tile_width),
            ("tile height", tile_height),
        ] {
            if value == 0 {
                return Err(TemplateError::ZeroDimension { name });
            }
        }
        if u64::from(width) * u64::from(height) > MAX_TEMPLATE_PIXELS {
            return Err(TemplateError::TooLarge { width, height, max: MAX_TEMPLATE_PIXELS });
        }
        if width % tile_width != 0 {
            return Err(TemplateError::NotDivisible { axis: "width", size: width, tile: tile_width });
        }
        if height % tile_height != 0 {
            return Err(TemplateError::NotDivisible {
                axis: "height",
                size: height,
                tile: tile_height,
            });
        }
        Ok(Self { width, height, tile_width, tile_height })
    }

    /// Number of tiles across and down.
    pub fn tile_counts(&self) -> (u32, u32) {
        (self.width / self.tile_width, self.height / self.tile_height)
    }
}

/// Render the checkerboard: tile `(i, j)` is `primary` when `i + j` is even.
pub fn render_template(spec: &TemplateSpec, primary: PixelColor, secondary: PixelColor) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(spec.width, spec.height, primary);
    for y in 0..spec.height {
        let row = y / spec.tile_height;
        for x in 0..spec.width {
            let col = x / spec.tile_width;
            if (row + col) % 2 == 1 {
                buffer.put(x, y, secondary);
            }
        }
    }
    buffer
}
