//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod analyze;
mod replace;
mod template;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ScanConfig};
use crate::error::Error;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Separator line used by the text reports
pub(crate) const RULE: &str = "--------------------------------------------------";

/// Palettescan - Count the colors of an image and replace them in bulk
#[derive(Parser)]
#[command(name = "pscan")]
#[command(about = "Palettescan - Count the colors of an image and replace them in bulk")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: nearest pscan.toml, then the XDG config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a color histogram of an image and print the most common colors
    Analyze {
        /// Image file to analyze
        input: PathBuf,

        /// Show the top N colors (default: 10, or analyze.limit in pscan.toml)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show every color instead of the top N
        #[arg(long)]
        all: bool,

        /// Show detailed statistics (transparency, most and least common colors)
        #[arg(long)]
        stats: bool,

        /// Export all colors to CSV (default path: colors.csv)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace colors in an image and save a modified copy
    Replace {
        /// Image file to recolor
        input: PathBuf,

        /// Comma-separated hex colors to replace (e.g., '#ff0000,#00ff00')
        old_colors: String,

        /// Comma-separated hex colors to replace with (e.g., '#0000ff,#ffff00')
        new_colors: String,

        /// Show how many pixels would change without saving
        #[arg(long)]
        preview: bool,

        /// Output file or directory.
        /// If omitted: {input dir}/{stem}_color_change.{ext}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suffix appended to the input file name when -o is omitted or a directory
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Generate a checkerboard sprite template image
    Template {
        /// Image width in pixels
        width: u32,

        /// Image height in pixels
        height: u32,

        /// Tile width in pixels (must divide the image width)
        tile_width: u32,

        /// Tile height in pixels (must divide the image height)
        tile_height: u32,

        /// Output file (default: sprite_template.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Color of the top-left tile (default: #008000)
        #[arg(long)]
        primary: Option<String>,

        /// Color of the alternating tiles (default: #ff0000)
        #[arg(long)]
        secondary: Option<String>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::Analyze { input, limit, all, stats, csv, json } => {
            let overrides =
                CliOverrides { limit, csv_path: csv.clone().flatten(), ..Default::default() };
            if let Err(code) = apply_overrides(&mut config, &overrides) {
                return code;
            }
            analyze::run_analyze(&input, &config, all, stats, csv.is_some(), json)
        }
        Commands::Replace { input, old_colors, new_colors, preview, output, suffix } => {
            let overrides = CliOverrides { suffix, ..Default::default() };
            if let Err(code) = apply_overrides(&mut config, &overrides) {
                return code;
            }
            replace::run_replace(
                &input,
                &old_colors,
                &new_colors,
                preview,
                output.as_deref(),
                &config,
            )
        }
        Commands::Template {
            width,
            height,
            tile_width,
            tile_height,
            output,
            primary,
            secondary,
        } => {
            let overrides = CliOverrides { primary, secondary, ..Default::default() };
            if let Err(code) = apply_overrides(&mut config, &overrides) {
                return code;
            }
            template::run_template(
                width,
                height,
                tile_width,
                tile_height,
                output.as_deref(),
                &config,
            )
        }
    }
}

/// Install the `env_logger` backend.
///
/// `--verbose` lowers the default filter from `warn` to `debug`; `RUST_LOG`
/// overrides both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A logger may already be installed when run from tests
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

/// Merge command-line overrides and re-check the result.
///
/// The config file was validated when loaded, so any problem found here
/// comes from a flag and is reported as invalid arguments.
fn apply_overrides(config: &mut ScanConfig, overrides: &CliOverrides) -> Result<(), ExitCode> {
    merge_cli_overrides(config, overrides);
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        eprintln!("Error: invalid option {}", error);
    }
    Err(ExitCode::from(EXIT_INVALID_ARGS))
}

/// Print `err` and map it to an exit code.
pub(crate) fn fail(err: &Error) -> ExitCode {
    eprintln!("Error: {}", err);
    if err.is_invalid_input() {
        ExitCode::from(EXIT_INVALID_ARGS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Report a missing input file the way every command does.
pub(crate) fn ensure_exists(path: &Path) -> Result<(), ExitCode> {
    if path.exists() {
        Ok(())
    } else {
        eprintln!("Error: File '{}' not found!", path.display());
        Err(ExitCode::from(EXIT_ERROR))
    }
}
