//! Replace command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::ScanConfig;
use crate::output::{load_image, replacement_target, save_image};
use crate::replace::{apply, preview, ReplacementSpec};
use crate::report::format_preview_line;

use super::{ensure_exists, fail, EXIT_SUCCESS, RULE};

/// Execute the replace command
pub fn run_replace(
    input: &Path,
    old_colors: &str,
    new_colors: &str,
    preview_only: bool,
    output: Option<&Path>,
    config: &ScanConfig,
) -> ExitCode {
    if let Err(code) = ensure_exists(input) {
        return code;
    }

    // Validate colors before touching the image
    let spec = match ReplacementSpec::parse(old_colors, new_colors) {
        Ok(spec) => spec,
        Err(e) => return fail(&e),
    };

    let output_path = match replacement_target(input, output, &config.replace.suffix) {
        Ok(path) => path,
        Err(e) => return fail(&e),
    };

    println!("Processing image: {}", input.display());
    let buffer = match load_image(input) {
        Ok(buffer) => buffer,
        Err(e) => return fail(&e),
    };
    println!("Image dimensions: {}x{}", buffer.width(), buffer.height());
    println!();

    println!("Color replacements to be made:");
    for (old, new) in spec.pairs() {
        println!("  {} → {}", old, new);
    }
    println!();

    println!("Preview of changes:");
    println!("{}", RULE);
    for entry in preview(&buffer, &spec) {
        println!("{}", format_preview_line(&entry));
    }
    println!();

    if preview_only {
        println!("Preview mode - no changes saved.");
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Performing color replacement...");
    let result = apply(&buffer, &spec);
    if let Err(e) = save_image(&result.buffer, &output_path) {
        return fail(&e);
    }

    println!("Image saved as: {}", output_path.display());
    println!("Total pixels replaced: {}", result.replaced);
    println!();
    println!("✓ Color replacement completed successfully!");
    println!("Original file: {}", input.display());
    println!("New file: {}", output_path.display());

    ExitCode::from(EXIT_SUCCESS)
}
