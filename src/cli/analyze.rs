//! Analyze command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::ScanConfig;
use crate::histogram::ColorHistogram;
use crate::output::load_image;
use crate::report::{export_csv, format_color_line, AnalysisReport};

use super::{ensure_exists, fail, EXIT_ERROR, EXIT_SUCCESS, RULE};

/// Execute the analyze command
pub fn run_analyze(
    input: &Path,
    config: &ScanConfig,
    all: bool,
    stats: bool,
    csv: bool,
    json: bool,
) -> ExitCode {
    if let Err(code) = ensure_exists(input) {
        return code;
    }

    let buffer = match load_image(input) {
        Ok(buffer) => buffer,
        Err(e) => return fail(&e),
    };
    let histogram = ColorHistogram::build(&buffer);
    let limit = if all { None } else { Some(config.analyze.limit) };
    let report = AnalysisReport::new(input, &buffer, &histogram, limit, config.analyze.least);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_summary(&report, all, config.analyze.limit);
        if stats {
            print_stats(&report);
        }
    }

    if csv {
        let path = &config.analyze.csv_path;
        if let Err(e) = export_csv(path, &histogram.all_colors()) {
            return fail(&e);
        }
        // Keep stdout parseable in JSON mode
        if json {
            eprintln!("Colors exported to {}", path.display());
        } else {
            println!("Colors exported to {}", path.display());
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn print_summary(report: &AnalysisReport, all: bool, limit: usize) {
    println!("Analyzing image: {}", report.path);
    println!("Dimensions: {}x{}", report.width, report.height);
    println!("Total pixels: {}", report.total_pixels);
    println!("{}", RULE);
    println!("Found {} unique colors", report.distinct_colors);
    println!();

    if all {
        println!("All colors found:");
    } else {
        println!("Top {} most common colors:", limit);
    }
    println!("{}", RULE);
    for (i, entry) in report.colors.iter().enumerate() {
        println!("{}", format_color_line(i + 1, entry));
    }
}

fn print_stats(report: &AnalysisReport) {
    println!();
    println!("Detailed Statistics:");
    println!("{}", RULE);
    println!("Total unique colors: {}", report.distinct_colors);
    println!("Total pixels: {}", report.total_pixels);
    println!("Has transparency: {}", report.has_transparency);

    if let Some(most) = &report.most_common {
        println!(
            "Most common color: {} ({} pixels, {:.2}%)",
            most.hex, most.count, most.percentage
        );
    }

    if !report.least_common.is_empty() {
        println!("Least common colors:");
        for entry in &report.least_common {
            println!("  {} ({} pixels, {:.2}%)", entry.hex, entry.count, entry.percentage);
        }
    }
}
