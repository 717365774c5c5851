//! Fan Hub API conformance checking.
//!
//! This module drives a fixed sequence of HTTP checks against the Fan Hub
//! REST API, validates the standard `{success, message?, data?, error?}`
//! envelope and status codes of each endpoint, and summarises the outcome.
//! Requests go through the [`ApiGateway`] trait so every check can be tested
//! against mocks as well as a live server.

pub mod checks;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod models;
pub mod report;
pub mod suite;

pub use checks::{CreationOutcome, SWEEP_ENDPOINTS};
pub use envelope::Envelope;
pub use error::ConformanceError;
pub use gateway::{ApiBase, ApiGateway, ApiResponse, DEFAULT_TIMEOUT_SECS, ReqwestGateway};
pub use models::{CheckResult, CreatedResource, ResourceKind, RunSummary};
pub use report::write_json_report;
pub use suite::ConformanceSuite;
