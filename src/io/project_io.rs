use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use tempfile::NamedTempFile;

use crate::model::project::Project;

/// Default project file name used by the CLI
pub const DEFAULT_PROJECT_FILE: &str = "fractal.json";

/// Raised when a project cannot be turned into JSON. Surfaced loudly since
/// swallowing it would lose data on save.
#[derive(Debug, thiserror::Error)]
#[error("could not serialize fractal: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

/// Error type for project file I/O
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("no fractal project at {0} (run `fractal init`)")]
    NotFound(PathBuf),
    #[error("project file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Snapshot the project with a fresh `modified` stamp and render it as JSON.
///
/// Key order follows field declaration order, so output is stable for diffs.
pub fn serialize_fractal(project: &Project) -> Result<String, SerializationError> {
    let mut snapshot = project.clone();
    snapshot.touch(Utc::now());
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse a project from stored JSON.
pub fn deserialize_fractal(json: &str) -> Result<Project, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load a project from a JSON file.
pub fn load_project_file(path: &Path) -> Result<Project, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| ProjectError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    deserialize_fractal(&text).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize and atomically write a project to `path`.
pub fn save_project_file(path: &Path, project: &Project) -> Result<(), ProjectError> {
    let json = serialize_fractal(project)?;
    write_text(path, &json)?;
    info!("saved fractal to {}", path.display());
    Ok(())
}

/// Atomically write text (e.g. a markdown export) to `path`.
pub fn write_text(path: &Path, content: &str) -> Result<(), ProjectError> {
    atomic_write(path, content.as_bytes()).map_err(|e| ProjectError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write via a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
