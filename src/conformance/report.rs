//! JSON report persistence for finished runs.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::ConformanceError;
use super::models::RunSummary;

/// Writes the run summary as pretty-printed JSON to `path`.
///
/// The parent directory must already exist; the file is created or replaced.
///
/// # Errors
///
/// Returns [`ConformanceError::Io`] when the path has no file name, the parent
/// directory cannot be opened, or the file cannot be written.
pub fn write_json_report(path: &Utf8Path, summary: &RunSummary) -> Result<(), ConformanceError> {
    let file_name = path.file_name().ok_or_else(|| ConformanceError::Io {
        message: format!("invalid report path '{path}': no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        ConformanceError::Io {
            message: format!("failed to open report directory '{parent}': {error}"),
        }
    })?;

    let json = serde_json::to_string_pretty(summary).map_err(|error| ConformanceError::Io {
        message: format!("failed to serialise run summary: {error}"),
    })?;

    dir.write(file_name, json).map_err(|error| ConformanceError::Io {
        message: format!("failed to write report '{path}': {error}"),
    })?;

    tracing::debug!("wrote JSON report to {path}");
    Ok(())
}
