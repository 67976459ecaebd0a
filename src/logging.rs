//! Diagnostic logging for the `fractal` binary.
//!
//! Library code only uses the `log` macros; this module wires them to stderr
//! so stdout stays clean for command output and `--json`.

use flexi_logger::{Logger, LoggerHandle};

/// Environment variable consulted when `--log-level` is not given
pub const LOG_ENV_VAR: &str = "FRACTAL_LOG";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Normalize a level name. Returns `None` for anything unrecognized.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Some("off"),
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Pick the level: flag, then environment, then the default.
///
/// An unrecognized flag value is an error; an unrecognized environment value
/// is ignored.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>) -> Result<&'static str, String> {
    if let Some(flag) = flag {
        return normalize_level(flag).ok_or_else(|| {
            format!("unsupported log level `{flag}`; expected off|trace|debug|info|warn|error")
        });
    }
    Ok(env.and_then(normalize_level).unwrap_or(DEFAULT_LOG_LEVEL))
}

/// Start a stderr logger at `level`. Keep the handle alive for the process.
pub fn init_logging(level: &str) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}
