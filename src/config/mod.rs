//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach. Every field is optional: the
//! checker runs with no flags at all.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.fanhub.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `FANHUB_BASE_URL`, `FANHUB_SETTINGS_FILE`,
//!    `FANHUB_TIMEOUT_SECONDS`, `FANHUB_REPORT_PATH`
//! 4. **Command-line arguments** – `--base-url`/`-b`, `--settings-file`/`-s`,
//!    `--timeout-seconds`, `--report-path`/`-r`
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "http://localhost:8001"
//! settings_file = "frontend/.env"
//! timeout_seconds = 10
//! report_path = "fanhub-report.json"
//! ```

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::conformance::{ConformanceError, DEFAULT_TIMEOUT_SECS};
use crate::settings::{DEFAULT_SETTINGS_PATH, resolve_backend_url};

/// Checker configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use fanhub_conformance::FanHubConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = FanHubConfig::load().expect("failed to load configuration");
/// let base_url = config.resolve_base_url();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FANHUB",
    discovery(
        dotfile_name = ".fanhub.toml",
        config_file_name = "fanhub.toml",
        app_name = "fanhub"
    )
)]
pub struct FanHubConfig {
    /// Backend base URL, bypassing the settings file.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>` or `-b <URL>`
    /// - Environment: `FANHUB_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub base_url: Option<String>,

    /// Path of the frontend settings file holding `REACT_APP_BACKEND_URL`.
    ///
    /// Defaults to `/app/frontend/.env`.
    ///
    /// Can be provided via:
    /// - CLI: `--settings-file <PATH>` or `-s <PATH>`
    /// - Environment: `FANHUB_SETTINGS_FILE`
    /// - Config file: `settings_file = "..."`
    #[ortho_config(cli_short = 's')]
    pub settings_file: Option<String>,

    /// Per-request timeout in seconds. Defaults to 10.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Destination for a JSON copy of the run summary.
    ///
    /// Can be provided via:
    /// - CLI: `--report-path <PATH>` or `-r <PATH>`
    /// - Environment: `FANHUB_REPORT_PATH`
    /// - Config file: `report_path = "..."`
    #[ortho_config(cli_short = 'r')]
    pub report_path: Option<String>,
}

impl Default for FanHubConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            settings_file: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            report_path: None,
        }
    }
}

impl FanHubConfig {
    /// Settings file to consult for the backend URL.
    #[must_use]
    pub fn settings_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(
            self.settings_file
                .as_deref()
                .unwrap_or(DEFAULT_SETTINGS_PATH),
        )
    }

    /// Resolves the backend base URL.
    ///
    /// An explicit `base_url` wins; otherwise the settings file is consulted,
    /// falling back to the default backend.
    #[must_use]
    pub fn resolve_base_url(&self) -> String {
        self.base_url.as_deref().map_or_else(
            || resolve_backend_url(&self.settings_path()),
            ToOwned::to_owned,
        )
    }

    /// Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::Configuration`] when the timeout is zero.
    pub fn request_timeout(&self) -> Result<Duration, ConformanceError> {
        if self.timeout_seconds == 0 {
            return Err(ConformanceError::Configuration {
                message: "timeout must be at least one second (use --timeout-seconds)".to_owned(),
            });
        }
        Ok(Duration::from_secs(self.timeout_seconds))
    }

    /// Where to write the JSON report, when requested.
    #[must_use]
    pub fn report_path(&self) -> Option<&Utf8Path> {
        self.report_path.as_deref().map(Utf8Path::new)
    }
}

#[cfg(test)]
mod tests;
