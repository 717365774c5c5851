//! Backend URL discovery from the frontend settings file.
//!
//! The frontend keeps its backend location in a dotenv-style file of
//! `KEY=VALUE` lines. The checker reuses that value so it always targets the
//! same deployment the frontend talks to.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Settings file consulted when no other path is configured.
pub const DEFAULT_SETTINGS_PATH: &str = "/app/frontend/.env";

/// Backend used when the settings file is missing or silent.
pub const DEFAULT_BACKEND_URL: &str = "https://fanhub-pro.preview.emergentagent.com";

/// Line prefix carrying the backend URL.
pub const BACKEND_URL_PREFIX: &str = "REACT_APP_BACKEND_URL=";

/// Resolves the backend base URL from the settings file at `path`.
///
/// Returns the value of the first `REACT_APP_BACKEND_URL=` line, trimmed. A
/// missing or unreadable file, or a file without that key, yields
/// [`DEFAULT_BACKEND_URL`]. The value is not validated.
#[must_use]
pub fn resolve_backend_url(path: &Utf8Path) -> String {
    let contents = match read_settings(path) {
        Ok(contents) => contents,
        Err(error) => {
            tracing::debug!("settings file '{path}' unavailable ({error}); using default backend");
            return DEFAULT_BACKEND_URL.to_owned();
        }
    };

    backend_url_from_settings(&contents).unwrap_or_else(|| {
        tracing::debug!("no {BACKEND_URL_PREFIX} line in '{path}'; using default backend");
        DEFAULT_BACKEND_URL.to_owned()
    })
}

/// Extracts the backend URL from settings file contents.
#[must_use]
pub fn backend_url_from_settings(contents: &str) -> Option<String> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix(BACKEND_URL_PREFIX))
        .map(|value| value.trim().to_owned())
}

fn read_settings(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("settings path has no file name"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    Dir::open_ambient_dir(parent, ambient_authority())?.read_to_string(file_name)
}
