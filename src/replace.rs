//! Bulk color replacement
//!
//! A [`ReplacementSpec`] is an ordered list of `old -> new` color rules.
//! [`preview`] counts how many pixels each rule would touch without
//! producing an image; [`apply`] produces a rewritten copy of the buffer and
//! the number of pixels changed. Neither touches the source buffer.
//!
//! When a spec lists the same old color twice, the first rule wins.

use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::color::{parse_color_list, PixelColor};
use crate::error::{Error, Result};
use crate::histogram::{percentage, PARALLEL_MIN_PIXELS, ROWS_PER_TASK};

/// Ordered `old -> new` color substitution rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplacementSpec {
    pairs: Vec<(PixelColor, PixelColor)>,
}

impl ReplacementSpec {
    /// Pair up old and new colors by position.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReplacementSpecMismatch` if the lists differ in length.
    pub fn new(old: Vec<PixelColor>, new: Vec<PixelColor>) -> Result<Self> {
        if old.len() != new.len() {
            return Err(Error::ReplacementSpecMismatch { old: old.len(), new: new.len() });
        }
        Ok(Self { pairs: old.into_iter().zip(new).collect() })
    }

    /// Build a spec from explicit pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (PixelColor, PixelColor)>) -> Self {
        Self { pairs: pairs.into_iter().collect() }
    }

    /// Parse two comma-separated hex color lists into a spec.
    ///
    /// Both lists are parsed before their lengths are compared, so a
    /// malformed color is reported ahead of a count mismatch.
    pub fn parse(old: &str, new: &str) -> Result<Self> {
        let old = parse_color_list(old)?;
        let new = parse_color_list(new)?;
        Self::new(old, new)
    }

    pub fn pairs(&self) -> &[(PixelColor, PixelColor)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Old -> new lookup; the first rule for a given old color wins.
    fn lookup(&self) -> HashMap<PixelColor, PixelColor> {
        let mut lookup = HashMap::with_capacity(self.pairs.len());
        for &(old, new) in &self.pairs {
            lookup.entry(old).or_insert(new);
        }
        lookup
    }
}

/// How many pixels one rule would rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewEntry {
    pub old: PixelColor,
    pub new: PixelColor,
    pub match_count: u64,
    /// Share of the whole image, rounded to two decimals
    pub percentage: f64,
}

/// Output of [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementResult {
    /// Rewritten copy of the source image
    pub buffer: PixelBuffer,
    /// Number of pixels that matched a rule
    pub replaced: u64,
}

/// Count the pixels matching each rule's old color, in rule order.
///
/// Every rule gets the full count of its old color, independent of the other
/// rules. Runs a single pass over the image regardless of the rule count.
pub fn preview(buffer: &PixelBuffer, spec: &ReplacementSpec) -> Vec<PreviewEntry> {
    let mut targets: HashMap<PixelColor, usize> = HashMap::new();
    for &(old, _) in spec.pairs() {
        let next = targets.len();
        targets.entry(old).or_insert(next);
    }

    let slots = targets.len();
    let count_matches = |pixels: &[PixelColor]| -> Vec<u64> {
        let mut counts = vec![0u64; slots];
        for pixel in pixels {
            if let Some(&slot) = targets.get(pixel) {
                counts[slot] += 1;
            }
        }
        counts
    };

    let pixels = buffer.pixels();
    let counts = if slots == 0 || pixels.len() < PARALLEL_MIN_PIXELS {
        count_matches(pixels)
    } else {
        pixels.par_chunks(buffer.width() as usize * ROWS_PER_TASK).map(count_matches).reduce(
            || vec![0u64; slots],
            |mut acc, part| {
                for (total, n) in acc.iter_mut().zip(part) {
                    *total += n;
                }
                acc
            },
        )
    };

    let total = buffer.len() as u64;
    spec.pairs()
        .iter()
        .map(|&(old, new)| {
            let match_count = targets.get(&old).map_or(0, |&slot| counts[slot]);
            PreviewEntry { old, new, match_count, percentage: percentage(match_count, total) }
        })
        .collect()
}

/// Rewrite every pixel matching a rule into a new buffer.
///
/// The source buffer is copied, never modified. Rows are processed in
/// parallel for large images; each output row is written by exactly one task.
pub fn apply(buffer: &PixelBuffer, spec: &ReplacementSpec) -> ReplacementResult {
    let lookup = spec.lookup();
    let mut output = buffer.clone();
    if lookup.is_empty() || output.is_empty() {
        return ReplacementResult { buffer: output, replaced: 0 };
    }

    let rewrite = |pixels: &mut [PixelColor]| -> u64 {
        let mut replaced = 0;
        for pixel in pixels.iter_mut() {
            if let Some(&new) = lookup.get(pixel) {
                *pixel = new;
                replaced += 1;
            }
        }
        replaced
    };

    let chunk = output.width() as usize * ROWS_PER_TASK;
    let replaced = if output.len() < PARALLEL_MIN_PIXELS {
        rewrite(output.pixels_mut())
    } else {
        output.pixels_mut().par_chunks_mut(chunk).map(rewrite).sum()
    };

    debug!("replace: {} of {} pixels rewritten by {} rules", replaced, buffer.len(), spec.len());
    ReplacementResult { buffer: output, replaced }
}
