use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::config::FractalConfig;

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "fractal.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<FractalConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the effective config: an explicit file must exist; otherwise
/// `fractal.toml` in `dir` is used when present, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<FractalConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        return read_config(&candidate);
    }
    debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
    Ok(FractalConfig::default())
}
