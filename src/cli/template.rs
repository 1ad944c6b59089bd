//! Template command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_hex;
use crate::config::ScanConfig;
use crate::error::Error;
use crate::output::save_image;
use crate::template::{render_template, TemplateSpec};

use super::{fail, EXIT_SUCCESS};

/// Execute the template command
pub fn run_template(
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    output: Option<&Path>,
    config: &ScanConfig,
) -> ExitCode {
    let spec = match TemplateSpec::new(width, height, tile_width, tile_height) {
        Ok(spec) => spec,
        Err(e) => return fail(&Error::from(e)),
    };

    // Overrides from the command line have not been validated yet
    let colors = parse_hex(&config.template.primary)
        .and_then(|primary| parse_hex(&config.template.secondary).map(|secondary| (primary, secondary)));
    let (primary, secondary) = match colors {
        Ok(colors) => colors,
        Err(e) => return fail(&Error::from(e)),
    };

    let buffer = render_template(&spec, primary, secondary);
    let path = output.unwrap_or(config.template.output.as_path());
    if let Err(e) = save_image(&buffer, path) {
        return fail(&e);
    }

    let (across, down) = spec.tile_counts();
    println!(
        "Template saved as: {} ({}x{} tiles of {}x{} pixels)",
        path.display(),
        across,
        down,
        tile_width,
        tile_height
    );
    ExitCode::from(EXIT_SUCCESS)
}
