//! Export file format and writer.

use super::{Document, RagError};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version stamped into every export; bump on incompatible document changes.
pub const EXPORT_VERSION: &str = "1.0";

/// Default export file name, relative to the working directory.
pub const DEFAULT_EXPORT_FILE: &str = "experiences_export.json";

/// Top-level object written to an export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    /// Time the export was taken.
    pub export_date: DateTime<Utc>,
    /// Number of documents in [`ExportEnvelope::data`].
    pub total_records: usize,
    /// Format version, [`EXPORT_VERSION`].
    pub version: String,
    /// Exported documents.
    pub data: Vec<Document>,
}

impl ExportEnvelope {
    /// Wraps `data` taken at `export_date`.
    #[must_use]
    pub fn new(export_date: DateTime<Utc>, data: Vec<Document>) -> Self {
        Self {
            export_date,
            total_records: data.len(),
            version: EXPORT_VERSION.to_owned(),
            data,
        }
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must exist; a bare file name is resolved against
/// the working directory.
pub(super) fn write_file(path: &Utf8Path, contents: &[u8]) -> Result<(), RagError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RagError::MissingFileName(path.to_path_buf()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let write_error = |source| RagError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(write_error)?;
    dir.write(file_name, contents).map_err(write_error)
}

/// Resolves the export destination, falling back to [`DEFAULT_EXPORT_FILE`].
#[must_use]
pub fn export_path(requested: Option<&str>) -> Utf8PathBuf {
    requested
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map_or_else(|| Utf8PathBuf::from(DEFAULT_EXPORT_FILE), Utf8PathBuf::from)
}
