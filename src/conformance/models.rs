//! Records produced by a conformance run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one executed check.
///
/// Results are immutable once built; the suite only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(rename = "test")]
    name: String,
    success: bool,
    message: String,
    timestamp: DateTime<Utc>,
    #[serde(rename = "response_data")]
    response: Option<Value>,
}

impl CheckResult {
    /// Builds a passing result stamped with the current time.
    #[must_use]
    pub fn passed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, true, message)
    }

    /// Builds a failing result stamped with the current time.
    #[must_use]
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, false, message)
    }

    fn new(name: impl Into<String>, success: bool, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success,
            message: message.into(),
            timestamp: Utc::now(),
            response: None,
        }
    }

    /// Attaches the response payload that backs this outcome.
    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    /// Overrides the timestamp, for deterministic fixtures.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check name, e.g. `Health Check`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the check passed.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Human-readable outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the result was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Response payload attached to the result, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }
}

/// Kind of entity created during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// An outfit posted to `/outfits`.
    Outfit,
    /// A question posted to `/questions`.
    Question,
    /// A fan profile posted to `/fans`.
    Fan,
}

impl ResourceKind {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Outfit => "outfit",
            Self::Question => "question",
            Self::Fan => "fan",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entity created by a check, kept so an operator can clean up afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    /// What was created.
    pub kind: ResourceKind,
    /// Identifier assigned by the server.
    pub id: String,
}

impl CreatedResource {
    /// Pairs a kind with its server-assigned identifier.
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Totals derived from a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    total: usize,
    passed: usize,
    failed: usize,
    success_rate: Option<f64>,
    results: Vec<CheckResult>,
    created_resources: Vec<CreatedResource>,
}

impl RunSummary {
    /// Derives the totals from the ordered result log.
    #[must_use]
    pub fn from_results(results: Vec<CheckResult>, created_resources: Vec<CreatedResource>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|result| result.success()).count();
        let failed = total - passed;

        Self {
            total,
            passed,
            failed,
            success_rate: success_rate(passed, total),
            results,
            created_resources,
        }
    }

    /// Number of executed checks.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of passing checks.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failing checks.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Percentage of passing checks, or `None` when nothing ran.
    #[must_use]
    pub const fn success_rate(&self) -> Option<f64> {
        self.success_rate
    }

    /// Every result in execution order.
    #[must_use]
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Failing results in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| !result.success())
    }

    /// Entities created during the run.
    #[must_use]
    pub fn created_resources(&self) -> &[CreatedResource] {
        &self.created_resources
    }

    /// Whether every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "check counts are tiny and the rate is only displayed"
)]
fn success_rate(passed: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(passed as f64 / total as f64 * 100.0)
}
