//! PP-015: Pipeline store: load, save (atomic), format by extension.

use super::error::PlanError;
use super::types::PipelineDescription;
use std::path::Path;

/// Serialization format for a stored pipeline description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` is JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> PlanError {
    PlanError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Render a description in the given format.
pub fn render(desc: &PipelineDescription, format: Format) -> Result<String, PlanError> {
    match format {
        Format::Yaml => serde_yaml_ng::to_string(desc).map_err(|e| PlanError::Parse {
            message: format!("serialize error: {}", e),
        }),
        Format::Json => serde_json::to_string_pretty(desc).map_err(|e| PlanError::Parse {
            message: format!("serialize error: {}", e),
        }),
    }
}

/// Load a stored description. Returns None if the file doesn't exist.
pub fn load_pipeline(path: &Path) -> Result<Option<PipelineDescription>, PlanError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let desc = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&content).map_err(|e| PlanError::Parse {
            message: format!("invalid pipeline {}: {}", path.display(), e),
        })?,
        Format::Yaml => serde_yaml_ng::from_str(&content).map_err(|e| PlanError::Parse {
            message: format!("invalid pipeline {}: {}", path.display(), e),
        })?,
    };
    Ok(Some(desc))
}

/// Save a description atomically (write to temp, then rename).
pub fn save_pipeline(path: &Path, desc: &PipelineDescription) -> Result<(), PlanError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let body = render(desc, Format::from_path(path))?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, &body).map_err(|e| io_error(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_error(path, e))?;

    tracing::debug!(path = %path.display(), id = %desc.id, "saved pipeline");
    Ok(())
}
