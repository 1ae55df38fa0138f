use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning acquisition metadata into methods text.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no sidecar metadata found for {}", .path.display())]
    MissingMetadata { path: PathBuf },
    #[error("required metadata field '{field}' is missing for {}", .path.display())]
    MissingField { path: PathBuf, field: &'static str },
    #[error("malformed auxiliary file {}: {reason}", .path.display())]
    MalformedAuxiliaryFile { path: PathBuf, reason: String },
    #[error("no '{table}' mapping configured for code '{code}'")]
    ConfigLookup { table: &'static str, code: String },
    #[error("cannot render {value} as {form} words")]
    Format { value: i64, form: &'static str },
    #[error("image geometry unavailable for {}: {reason}", .path.display())]
    Image { path: PathBuf, reason: String },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Missing sidecars and missing required fields skip a group without failing it.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ReportError::MissingMetadata { .. } | ReportError::MissingField { .. }
        )
    }
}
