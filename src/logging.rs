//! Logger setup for the command line binary.

use crate::config::LogLevel;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Level requested by `-v`/`-q`, if any.
///
/// `--quiet` wins; each `-v` raises the level one step above `warn`. Without
/// flags the config file decides.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<LogLevel> {
    if quiet {
        return Some(LogLevel::Error);
    }
    match verbose {
        0 => None,
        1 => Some(LogLevel::Info),
        2 => Some(LogLevel::Debug),
        _ => Some(LogLevel::Trace),
    }
}

/// Start logging to stderr at `level`.
///
/// The returned handle must stay alive for as long as logging is needed.
pub fn setup_logging(level: LogLevel) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(level.as_spec())?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level_from_flags(0, false), None);
        assert_eq!(level_from_flags(1, false), Some(LogLevel::Info));
        assert_eq!(level_from_flags(2, false), Some(LogLevel::Debug));
        assert_eq!(level_from_flags(9, false), Some(LogLevel::Trace));
        assert_eq!(level_from_flags(3, true), Some(LogLevel::Error));
    }
}
