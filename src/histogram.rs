//! Color frequency histogram
//!
//! [`ColorHistogram::build`] visits every pixel once and counts occurrences of
//! each exact RGBA value. Entries are kept in the order colors were first
//! met during a row-major scan; that order is the tie-break for every ranked
//! query, so results are deterministic.
//!
//! Large buffers are scanned in row ranges on the rayon pool. Partial
//! histograms are merged in row order, which reproduces the sequential
//! first-seen order exactly.

use std::cmp::Reverse;
use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;

/// Default number of colors shown by ranked listings
pub const DEFAULT_TOP_COLORS: usize = 10;

/// Default number of colors returned by [`ColorHistogram::least_common`]
pub const DEFAULT_LEAST_COMMON: usize = 5;

/// Buffers with at least this many pixels are scanned in parallel
pub(crate) const PARALLEL_MIN_PIXELS: usize = 1 << 16;

/// Rows handed to each parallel task
pub(crate) const ROWS_PER_TASK: usize = 64;

/// A color and the number of pixels that have it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: PixelColor,
    pub count: u64,
}

/// A ranked histogram entry with its share of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorShare {
    pub color: PixelColor,
    pub count: u64,
    /// `count / total_pixels * 100`, rounded to two decimals
    pub percentage: f64,
}

/// Mapping from each distinct color in an image to its pixel count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorHistogram {
    /// Entries in first-seen scan order
    entries: Vec<ColorCount>,
    /// Color -> position in `entries`
    index: HashMap<PixelColor, usize>,
    total_pixels: u64,
}

impl ColorHistogram {
    /// Count every pixel of `buffer`.
    ///
    /// An empty buffer produces an empty histogram.
    pub fn build(buffer: &PixelBuffer) -> Self {
        let pixels = buffer.pixels();
        let histogram = if pixels.len() < PARALLEL_MIN_PIXELS {
            Self::from_pixels(pixels)
        } else {
            let chunk = buffer.width() as usize * ROWS_PER_TASK;
            debug!("histogram: parallel scan of {} pixels in {}-pixel chunks", pixels.len(), chunk);
            let partials: Vec<Self> = pixels.par_chunks(chunk).map(Self::from_pixels).collect();
            partials.into_iter().fold(Self::default(), |mut acc, part| {
                acc.merge(part);
                acc
            })
        };
        debug!(
            "histogram: {}x{} image, {} distinct colors",
            buffer.width(),
            buffer.height(),
            histogram.distinct_color_count()
        );
        histogram
    }

    /// Sequential scan of a pixel slice.
    fn from_pixels(pixels: &[PixelColor]) -> Self {
        let mut histogram = Self::default();
        for &color in pixels {
            histogram.add(color, 1);
        }
        histogram
    }

    fn add(&mut self, color: PixelColor, count: u64) {
        match self.index.get(&color) {
            Some(&i) => self.entries[i].count += count,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push(ColorCount { color, count });
            }
        }
        self.total_pixels += count;
    }

    /// Fold a histogram of a later region of the image into this one.
    ///
    /// Counts are summed; colors first seen in `later` are appended after the
    /// ones already present.
    pub fn merge(&mut self, later: Self) {
        for entry in later.entries {
            self.add(entry.color, entry.count);
        }
    }

    /// Total number of pixels scanned.
    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    /// Number of distinct RGBA values present.
    pub fn distinct_color_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pixel count for `color`, zero when absent.
    pub fn count_of(&self, color: PixelColor) -> u64 {
        self.index.get(&color).map_or(0, |&i| self.entries[i].count)
    }

    /// Entries in first-seen scan order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorCount> {
        self.entries.iter()
    }

    /// The `n` most common colors, highest count first.
    ///
    /// Returns every color when `n` exceeds the distinct color count.
    pub fn top_colors(&self, n: usize) -> Vec<ColorShare> {
        let mut sorted = self.entries.clone();
        // Stable sort keeps scan order among equal counts
        sorted.sort_by_key(|e| Reverse(e.count));
        sorted.into_iter().take(n).map(|e| self.share(e)).collect()
    }

    /// Every color, highest count first.
    pub fn all_colors(&self) -> Vec<ColorShare> {
        self.top_colors(usize::MAX)
    }

    /// The `n` least common colors, lowest count first.
    pub fn least_common(&self, n: usize) -> Vec<ColorShare> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.count);
        sorted.into_iter().take(n).map(|e| self.share(e)).collect()
    }

    /// The most common color; the earliest in scan order wins a tie.
    pub fn most_common(&self) -> Option<ColorShare> {
        let mut best: Option<&ColorCount> = None;
        for entry in &self.entries {
            match best {
                Some(b) if b.count >= entry.count => {}
                _ => best = Some(entry),
            }
        }
        best.map(|e| self.share(*e))
    }

    /// True when any pixel has alpha below 255.
    pub fn has_transparency(&self) -> bool {
        self.entries.iter().any(|e| e.color.is_translucent())
    }

    fn share(&self, entry: ColorCount) -> ColorShare {
        ColorShare {
            color: entry.color,
            count: entry.count,
            percentage: percentage(entry.count, self.total_pixels),
        }
    }
}

/// `count / total * 100` rounded to two decimals; zero for an empty total.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}
