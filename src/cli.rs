//! Command-line interface implementation

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, Hq2xConfig};
use crate::error::Result;
use crate::hqx::Hq2x;
use crate::io::{display_image, load_image, save_image};
use crate::logging::{level_from_flags, setup_logging};
use crate::surface::{Bitmap, Surface};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Output path that sends the image to the terminal instead of a file
pub const TERMINAL_OUTPUT: &str = "-";

/// hq2x - Magnify pixel art 2x with edge-aware smoothing
#[derive(Parser, Debug)]
#[command(name = "hq2x")]
#[command(about = "hq2x - Magnify pixel art 2x with edge-aware smoothing")]
#[command(version)]
pub struct Cli {
    /// Source image (any format the image crate decodes)
    pub input: PathBuf,

    /// Destination image; the format follows the extension ("-" shows it in the terminal)
    pub output: PathBuf,

    /// Also show the result in the terminal after writing it
    #[arg(long)]
    pub show: bool,

    /// Config file (default: nearest hq2x.toml walking up from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads for the parallel pass (0: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Scale on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    /// Precompute the full RGB to YUV table before scaling
    #[arg(long)]
    pub yuv_table: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threads: self.threads,
            parallel: self.sequential.then_some(false),
            yuv_table: self.yuv_table.then_some(true),
            log_level: level_from_flags(self.verbose, self.quiet),
        }
    }

    fn to_terminal(&self) -> bool {
        self.output.as_os_str() == TERMINAL_OUTPUT
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    run_with(Cli::parse())
}

/// Run with already parsed arguments
pub fn run_with(cli: Cli) -> ExitCode {
    if same_file(&cli.input, &cli.output) {
        eprintln!("Error: output '{}' would overwrite the input", cli.output.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    merge_cli_overrides(&mut config, &cli.overrides());

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("Error: {}", e);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let _logger = match setup_logging(config.log.level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    match run_upscale(&cli, &config) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            log::debug!("failed with {}", e.kind());
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load, magnify and save or show one image
fn run_upscale(cli: &Cli, config: &Hq2xConfig) -> Result<()> {
    let (input, output) = (cli.input.as_path(), cli.output.as_path());
    let started = Instant::now();
    let source = load_image(input)?;
    log::info!(
        "read {} ({}x{} {})",
        input.display(),
        source.width(),
        source.height(),
        source.mode()
    );

    let scaled = in_pool(config, || -> Result<Bitmap> {
        let scaler = Hq2x::with_options(config.upscale.options());
        Ok(scaler.upscale(&source)?)
    })?;

    if cli.to_terminal() {
        display_image(&scaled)?;
        log::info!("showed {}x{} in {:.1?}", scaled.width(), scaled.height(), started.elapsed());
        return Ok(());
    }

    save_image(&scaled, output)?;
    log::info!(
        "wrote {} ({}x{}) in {:.1?}",
        output.display(),
        scaled.width(),
        scaled.height(),
        started.elapsed()
    );
    if cli.show {
        display_image(&scaled)?;
    }
    Ok(())
}

/// Run `f` inside a dedicated rayon pool when a thread count is configured.
fn in_pool<T: Send>(config: &Hq2xConfig, f: impl FnOnce() -> T + Send) -> T {
    let threads = config.upscale.threads;
    if !config.upscale.parallel || threads == 0 {
        return f();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => {
            log::debug!("using {} worker threads", threads);
            pool.install(f)
        }
        Err(e) => {
            log::warn!("could not start {} threads ({}), using the global pool", threads, e);
            f()
        }
    }
}

/// True when both paths resolve to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
