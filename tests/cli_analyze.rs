//! CLI integration tests for the `pscan analyze` command.
//!
//! Writes small PNGs into a temp directory and checks the text, JSON and
//! CSV outputs of the built binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Run pscan inside `dir` (isolated from any user config) and return (stdout, stderr, code).
fn run_pscan(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pscan"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pscan");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

/// 2x2 image: red, red / blue, green
fn write_sample(dir: &TempDir) -> PathBuf {
    let mut image = RgbaImage::new(2, 2);
    image.put_pixel(0, 0, RED);
    image.put_pixel(1, 0, RED);
    image.put_pixel(0, 1, BLUE);
    image.put_pixel(1, 1, GREEN);
    let path = dir.path().join("sample.png");
    image.save(&path).unwrap();
    path
}

#[test]
fn test_analyze_text_summary() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Dimensions: 2x2"));
    assert!(stdout.contains("Total pixels: 4"));
    assert!(stdout.contains("Found 3 unique colors"));
    assert!(stdout.contains("1. #ff0000 (RGBA: 255,0,0,255) - 2 pixels (50.00%)"));
    assert!(stdout.contains("2. #0000ff (RGBA: 0,0,255,255) - 1 pixels (25.00%)"));
    assert!(stdout.contains("3. #00ff00 (RGBA: 0,255,0,255) - 1 pixels (25.00%)"));
}

#[test]
fn test_analyze_limit() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png", "--limit", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Top 1 most common colors:"));
    assert!(stdout.contains("1. #ff0000"));
    assert!(!stdout.contains("2. #"));
}

#[test]
fn test_analyze_stats() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png", "--stats"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Detailed Statistics:"));
    assert!(stdout.contains("Has transparency: false"));
    assert!(stdout.contains("Most common color: #ff0000 (2 pixels, 50.00%)"));
}

#[test]
fn test_analyze_json() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png", "--json", "--all"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["total_pixels"], 4);
    assert_eq!(json["distinct_colors"], 3);
    assert_eq!(json["has_transparency"], false);
    assert_eq!(json["most_common"]["hex"], "#ff0000");
    let colors = json["colors"].as_array().expect("colors array");
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[0]["count"], 2);
}

#[test]
fn test_analyze_transparency_detected() {
    let dir = TempDir::new().unwrap();
    let mut image = RgbaImage::from_pixel(3, 1, RED);
    image.put_pixel(2, 0, Rgba([0, 0, 0, 0]));
    image.save(dir.path().join("clear.png")).unwrap();

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "clear.png", "--json"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["has_transparency"], true);
}

#[test]
fn test_analyze_csv_default_path() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png", "--csv"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Colors exported to colors.csv"));

    let csv = std::fs::read_to_string(dir.path().join("colors.csv")).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "Rank,Hex,Red,Green,Blue,Alpha,PixelCount,Percentage");
    assert_eq!(lines[1], "1,#ff0000,255,0,0,255,2,50.00");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_analyze_csv_exports_all_colors_despite_limit() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);

    let (_, _, code) =
        run_pscan(dir.path(), &["analyze", "sample.png", "--limit", "1", "--csv", "out/palette.csv"]);
    assert_eq!(code, 0);
    let csv = std::fs::read_to_string(dir.path().join("out/palette.csv")).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_analyze_uses_config_limit() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);
    std::fs::write(dir.path().join("pscan.toml"), "[analyze]\nlimit = 2\n").unwrap();

    let (stdout, _, code) = run_pscan(dir.path(), &["analyze", "sample.png"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Top 2 most common colors:"));
    assert!(stdout.contains("2. #0000ff"));
    assert!(!stdout.contains("3. #"));
}

#[test]
fn test_analyze_invalid_config() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir);
    std::fs::write(dir.path().join("pscan.toml"), "[replace]\nsuffix = \"\"\n").unwrap();

    let (_, stderr, code) = run_pscan(dir.path(), &["analyze", "sample.png"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("replace.suffix"));
}

#[test]
fn test_analyze_missing_file() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_pscan(dir.path(), &["analyze", "nope.png"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: File 'nope.png' not found!"));
}

#[test]
fn test_analyze_undecodable_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();

    let (_, stderr, code) = run_pscan(dir.path(), &["analyze", "broken.png"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("failed to load image"));
}
