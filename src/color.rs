//! Pixel color value type and hex color codec
//!
//! Supports the following hex formats, with or without a leading `#`:
//! - `#RGB` - 3-digit shorthand, each digit is doubled (e.g., `#F00` -> red)
//! - `#RRGGBB` - 6-digit form
//!
//! Hex strings never carry alpha: parsed colors are always fully opaque, and
//! [`to_hex`] drops the alpha channel.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for hex color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string (or list token) was empty
    #[error("empty color string")]
    Empty,
    /// Wrong number of hex digits after the optional '#'
    #[error("invalid hex color '{token}': expected #RRGGBB or #RGB, got {len} digits")]
    InvalidLength { token: String, len: usize },
    /// A comma-separated list had nothing between two separators
    #[error("empty color at position {position} in list '{list}'")]
    EmptyToken { position: usize, list: String },
    /// Contains non-hex characters
    #[error("invalid hex color '{token}': '{ch}' is not a hex digit")]
    InvalidHex { token: String, ch: char },
}

/// One RGBA color with 8 bits per channel.
///
/// Two colors are equal only when all four channels match, so colors that
/// differ only in alpha are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelColor {
    /// Create a color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Decode a packed `0xRRGGBBAA` value.
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Encode as a packed `0xRRGGBBAA` value.
    pub const fn to_packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// True when the alpha channel is below 255.
    pub const fn is_translucent(self) -> bool {
        self.a < 255
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgba<u8>> for PixelColor {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

impl From<PixelColor> for Rgba<u8> {
    fn from(color: PixelColor) -> Self {
        Rgba(color.channels())
    }
}

impl fmt::Display for PixelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for PixelColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Parse a hex color string into an opaque [`PixelColor`].
///
/// # Examples
///
/// ```
/// use palettescan::color::{parse_hex, PixelColor};
///
/// assert_eq!(parse_hex("#F00").unwrap(), PixelColor::rgb(255, 0, 0));
/// assert_eq!(parse_hex("00ff00").unwrap(), PixelColor::rgb(0, 255, 0));
/// assert!(parse_hex("#ff00").is_err());
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the digits after the optional `#` are not exactly
/// 3 or 6 hexadecimal characters.
pub fn parse_hex(s: &str) -> Result<PixelColor, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').unwrap_or(s);

    // Validate all characters are hex before looking at the length
    if let Some(ch) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex { token: s.to_string(), ch });
    }

    // All ASCII from here on, so byte indexing is safe
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            // #RGB -> #RRGGBB (doubled digits)
            let r = hex_digit(bytes[0]) * 17;
            let g = hex_digit(bytes[1]) * 17;
            let b = hex_digit(bytes[2]) * 17;
            Ok(PixelColor::rgb(r, g, b))
        }
        6 => {
            let r = hex_pair(bytes[0], bytes[1]);
            let g = hex_pair(bytes[2], bytes[3]);
            let b = hex_pair(bytes[4], bytes[5]);
            Ok(PixelColor::rgb(r, g, b))
        }
        len => Err(ColorError::InvalidLength { token: s.to_string(), len }),
    }
}

/// Render a color as lowercase `#rrggbb`, dropping alpha.
pub fn to_hex(color: PixelColor) -> String {
    color.to_string()
}

/// Parse a comma-separated list of hex colors.
///
/// Whitespace around each token is ignored. Parsing stops at the first
/// malformed token and no partial list is returned; an empty token is
/// reported with its 1-based position.
///
/// ```
/// use palettescan::color::{parse_color_list, PixelColor};
///
/// let colors = parse_color_list("ff0000, #0f0").unwrap();
/// assert_eq!(colors, vec![PixelColor::rgb(255, 0, 0), PixelColor::rgb(0, 255, 0)]);
/// ```
pub fn parse_color_list(s: &str) -> Result<Vec<PixelColor>, ColorError> {
    s.split(',')
        .enumerate()
        .map(|(i, token)| match token.trim() {
            "" => Err(ColorError::EmptyToken { position: i + 1, list: s.to_string() }),
            token => parse_hex(token),
        })
        .collect()
}

/// Value of a single ASCII hex digit. Callers validate the input first.
fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

fn hex_pair(high: u8, low: u8) -> u8 {
    hex_digit(high) * 16 + hex_digit(low)
}
