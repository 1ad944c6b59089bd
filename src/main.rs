//! Palettescan - Command-line tool for color histograms and bulk color replacement

use std::process::ExitCode;

use palettescan::cli;

fn main() -> ExitCode {
    cli::run()
}
