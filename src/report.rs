//! Rendering of analysis and replacement results
//!
//! Text lines for the terminal, a serde-serializable report for `--json`,
//! and CSV export of the full color list.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::color::PixelColor;
use crate::error::Result;
use crate::histogram::{ColorHistogram, ColorShare};
use crate::replace::PreviewEntry;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "Rank,Hex,Red,Green,Blue,Alpha,PixelCount,Percentage";

/// One color of a report, with its hex form spelled out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub hex: String,
    pub rgba: PixelColor,
    pub count: u64,
    pub percentage: f64,
}

impl From<&ColorShare> for PaletteEntry {
    fn from(share: &ColorShare) -> Self {
        Self {
            hex: share.color.to_string(),
            rgba: share.color,
            count: share.count,
            percentage: share.percentage,
        }
    }
}

/// Everything `pscan analyze` knows about an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub total_pixels: u64,
    pub distinct_colors: usize,
    pub has_transparency: bool,
    pub most_common: Option<PaletteEntry>,
    pub least_common: Vec<PaletteEntry>,
    /// All colors, most common first
    pub colors: Vec<PaletteEntry>,
}

impl AnalysisReport {
    /// Collect a report from a scanned image.
    ///
    /// `least` bounds the least-common list; `limit` bounds `colors`
    /// (`None` keeps every color).
    pub fn new(
        path: &Path,
        buffer: &PixelBuffer,
        histogram: &ColorHistogram,
        limit: Option<usize>,
        least: usize,
    ) -> Self {
        let colors = histogram.top_colors(limit.unwrap_or(usize::MAX));
        Self {
            path: path.display().to_string(),
            width: buffer.width(),
            height: buffer.height(),
            total_pixels: histogram.total_pixels(),
            distinct_colors: histogram.distinct_color_count(),
            has_transparency: histogram.has_transparency(),
            most_common: histogram.most_common().as_ref().map(PaletteEntry::from),
            least_common: histogram.least_common(least).iter().map(PaletteEntry::from).collect(),
            colors: colors.iter().map(PaletteEntry::from).collect(),
        }
    }
}

/// `1. #ff0000 (RGBA: 255,0,0,255) - 2 pixels (50.00%)`
pub fn format_color_line(rank: usize, entry: &PaletteEntry) -> String {
    let c = entry.rgba;
    format!(
        "{}. {} (RGBA: {},{},{},{}) - {} pixels ({:.2}%)",
        rank, entry.hex, c.r, c.g, c.b, c.a, entry.count, entry.percentage
    )
}

/// `#ff0000 → #0000ff: 2 pixels (50.00%)`
pub fn format_preview_line(entry: &PreviewEntry) -> String {
    format!(
        "{} → {}: {} pixels ({:.2}%)",
        entry.old, entry.new, entry.match_count, entry.percentage
    )
}

/// Write ranked colors as CSV, rank starting at 1.
pub fn write_csv<W: Write>(mut writer: W, colors: &[ColorShare]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for (i, share) in colors.iter().enumerate() {
        let c = share.color;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{:.2}",
            i + 1,
            c,
            c.r,
            c.g,
            c.b,
            c.a,
            share.count,
            share.percentage
        )?;
    }
    writer.flush()
}

/// Export ranked colors to a CSV file, creating parent directories.
pub fn export_csv(path: &Path, colors: &[ColorShare]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), colors)?;
    Ok(())
}
