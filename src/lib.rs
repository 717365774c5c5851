//! Fan Hub API conformance checker.
//!
//! The library resolves the backend location from the frontend settings file,
//! drives a fixed sequence of HTTP checks against the Fan Hub REST API, and
//! summarises the outcome. Checks never abort a run: transport and shape
//! errors become failed results so the summary always covers every endpoint.

pub mod config;
pub mod conformance;
pub mod settings;

pub use config::FanHubConfig;
pub use conformance::{
    ApiBase, ApiGateway, ApiResponse, CheckResult, ConformanceError, ConformanceSuite,
    CreatedResource, ReqwestGateway, ResourceKind, RunSummary, write_json_report,
};
pub use settings::{DEFAULT_BACKEND_URL, DEFAULT_SETTINGS_PATH, resolve_backend_url};
