//! hq2x - Command-line tool for magnifying pixel art 2x

use std::process::ExitCode;

use sprite_hq2x::cli;

fn main() -> ExitCode {
    cli::run()
}
