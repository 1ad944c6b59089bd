//! Library-level tests running the scan and recolor pipeline through files

use palettescan::output::{load_image, replacement_output_path, save_image};
use palettescan::{apply, preview, ColorHistogram, PixelBuffer, PixelColor, ReplacementSpec};
use tempfile::TempDir;

const RED: PixelColor = PixelColor::rgb(255, 0, 0);
const GREEN: PixelColor = PixelColor::rgb(0, 255, 0);
const BLUE: PixelColor = PixelColor::rgb(0, 0, 255);

/// Horizontal stripes, one color per row
fn striped(width: u32, colors: &[PixelColor]) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, colors.len() as u32, PixelColor::default());
    for (y, color) in colors.iter().enumerate() {
        for x in 0..width {
            buffer.put(x, y as u32, *color);
        }
    }
    buffer
}

#[test]
fn test_png_round_trip_keeps_histogram() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stripes.png");
    let buffer = striped(8, &[RED, GREEN, GREEN, BLUE]);

    save_image(&buffer, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, buffer);

    let histogram = ColorHistogram::build(&loaded);
    assert_eq!(histogram.total_pixels(), 32);
    assert_eq!(histogram.count_of(GREEN), 16);
    let top = histogram.top_colors(1);
    assert_eq!(top[0].color, GREEN);
    assert_eq!(top[0].percentage, 50.0);
}

#[test]
fn test_recolor_then_rescan() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("stripes.png");
    save_image(&striped(4, &[RED, GREEN, BLUE]), &input).unwrap();

    let source = load_image(&input).unwrap();
    let spec = ReplacementSpec::parse("#f00,#0f0", "#00f,#00f").unwrap();
    let expected: u64 = preview(&source, &spec).iter().map(|e| e.match_count).sum();

    let result = apply(&source, &spec);
    assert_eq!(result.replaced, expected);

    let output = replacement_output_path(&input, "_color_change");
    save_image(&result.buffer, &output).unwrap();
    assert_eq!(output.file_name().unwrap(), "stripes_color_change.png");

    let histogram = ColorHistogram::build(&load_image(&output).unwrap());
    assert_eq!(histogram.distinct_color_count(), 1);
    assert_eq!(histogram.count_of(BLUE), 12);
}

#[test]
fn test_translucent_pixels_survive_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alpha.png");
    let ghost = PixelColor::rgba(10, 20, 30, 128);
    save_image(&striped(2, &[ghost, RED]), &path).unwrap();

    let histogram = ColorHistogram::build(&load_image(&path).unwrap());
    assert!(histogram.has_transparency());
    assert_eq!(histogram.count_of(ghost), 2);
}
