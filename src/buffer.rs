//! In-memory pixel grid
//!
//! A [`PixelBuffer`] is the decoded form of an image: `width * height`
//! colors in row-major order with the origin at the top-left corner.

use image::RgbaImage;

use crate::color::PixelColor;
use crate::error::{Error, Result};

/// Row-major grid of [`PixelColor`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<PixelColor>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: PixelColor) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, pixels: vec![fill; len] }
    }

    /// Wrap existing row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferSize` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<PixelColor>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(Error::BufferSize { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[PixelColor] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [PixelColor] {
        &mut self.pixels
    }

    /// Color at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<PixelColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set the color at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: PixelColor) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    /// Convert into an `image` crate buffer for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let raw: Vec<u8> = self.pixels.iter().flat_map(|c| c.channels()).collect();
        // Length always matches width * height * 4
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| PixelColor::from(*p)).collect();
        Self { width, height, pixels }
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::from(&image)
    }
}
