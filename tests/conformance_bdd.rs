//! Behavioural tests for the conformance suite against a mock Fan Hub API.

mod support;

use std::time::Duration;

use fanhub_conformance::{
    ApiBase, CheckResult, ConformanceError, ConformanceSuite, ReqwestGateway, RunSummary,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::fanhub_api::{
    SharedRuntime, ensure_runtime_and_server, mount_compliant_api, mount_get, mount_post,
    unused_base_url,
};
use wiremock::MockServer;

#[derive(ScenarioState, Default)]
struct ConformanceState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    base_url: Slot<String>,
    summary: Slot<RunSummary>,
}

#[fixture]
fn conformance_state() -> ConformanceState {
    ConformanceState::default()
}

fn step_error(message: impl Into<String>) -> ConformanceError {
    ConformanceError::Io {
        message: message.into(),
    }
}

/// Starts the mock server, runs `mount` against it and remembers its URL.
fn prepare_server(
    state: &ConformanceState,
    mount: impl FnOnce(&SharedRuntime, &MockServer),
) -> Result<(), ConformanceError> {
    let runtime = ensure_runtime_and_server(&state.runtime, &state.server)
        .map_err(|error| step_error(format!("failed to start mock server: {error}")))?;

    let uri = state
        .server
        .with_ref(|server| {
            mount(&runtime, server);
            server.uri()
        })
        .ok_or_else(|| step_error("mock server not initialised"))?;

    state.base_url.set(uri);
    Ok(())
}

fn find_result(state: &ConformanceState, name: &str) -> Result<CheckResult, ConformanceError> {
    state
        .summary
        .with_ref(|summary| {
            summary
                .results()
                .iter()
                .find(|result| result.name() == name)
                .cloned()
        })
        .ok_or_else(|| step_error("suite has not run"))?
        .ok_or_else(|| step_error(format!("no result named {name}")))
}

#[given("a compliant Fan Hub API")]
fn compliant_api(conformance_state: &ConformanceState) -> Result<(), ConformanceError> {
    prepare_server(conformance_state, mount_compliant_api)
}

#[given("a Fan Hub API whose status endpoint omits data")]
fn status_without_data(conformance_state: &ConformanceState) -> Result<(), ConformanceError> {
    prepare_server(conformance_state, |runtime, server| {
        mount_get(runtime, server, "/api/status", 200, &json!({"success": true}));
        mount_compliant_api(runtime, server);
    })
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a Fan Hub API that rejects votes with {error}")]
fn rejecting_votes(
    conformance_state: &ConformanceState,
    error: String,
) -> Result<(), ConformanceError> {
    let rejection = json!({"success": false, "error": error.trim_matches('"')});
    prepare_server(conformance_state, |runtime, server| {
        mount_post(runtime, server, "/api/votes", 400, &rejection);
        mount_compliant_api(runtime, server);
    })
}

#[given("a Fan Hub API that is not listening")]
fn unreachable_api(conformance_state: &ConformanceState) -> Result<(), ConformanceError> {
    let base_url = unused_base_url()
        .map_err(|error| step_error(format!("failed to reserve a port: {error}")))?;
    conformance_state.base_url.set(base_url);
    Ok(())
}

#[when("the conformance suite runs")]
fn run_suite(conformance_state: &ConformanceState) -> Result<(), ConformanceError> {
    let base_url = conformance_state
        .base_url
        .get()
        .ok_or_else(|| step_error("base URL not configured"))?;

    let gateway = ReqwestGateway::new(ApiBase::parse(&base_url)?, Duration::from_secs(5))?;
    let summary = ConformanceSuite::new(&gateway).run_all(|_| {});

    conformance_state.summary.set(summary);
    Ok(())
}

#[then("{count:u64} checks are recorded")]
fn assert_total(conformance_state: &ConformanceState, count: u64) -> Result<(), ConformanceError> {
    let total = conformance_state
        .summary
        .with_ref(|summary| summary.total() as u64)
        .ok_or_else(|| step_error("suite has not run"))?;

    if total == count {
        Ok(())
    } else {
        Err(step_error(format!("expected {count} results, found {total}")))
    }
}

#[then("{count:u64} checks fail")]
fn assert_failed(conformance_state: &ConformanceState, count: u64) -> Result<(), ConformanceError> {
    let (failed, failures) = conformance_state
        .summary
        .with_ref(|summary| {
            let failures: Vec<String> = summary
                .failures()
                .map(|result| format!("{}: {}", result.name(), result.message()))
                .collect();
            (summary.failed() as u64, failures)
        })
        .ok_or_else(|| step_error("suite has not run"))?;

    if failed == count {
        Ok(())
    } else {
        Err(step_error(format!(
            "expected {count} failures, found {failed}: {failures:?}"
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the check {name} passes")]
fn assert_passes(conformance_state: &ConformanceState, name: String) -> Result<(), ConformanceError> {
    let result = find_result(conformance_state, name.trim_matches('"'))?;

    if result.success() {
        Ok(())
    } else {
        Err(step_error(format!(
            "{name} failed: {}",
            result.message()
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the check {name} fails with {expected}")]
fn assert_fails_with(
    conformance_state: &ConformanceState,
    name: String,
    expected: String,
) -> Result<(), ConformanceError> {
    let result = find_result(conformance_state, name.trim_matches('"'))?;
    let expected_message = expected.trim_matches('"');

    if !result.success() && result.message() == expected_message {
        Ok(())
    } else {
        Err(step_error(format!(
            "expected {name} to fail with {expected}, got success={} message={}",
            result.success(),
            result.message()
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the check {name} reports a connection error")]
fn assert_connection_error(
    conformance_state: &ConformanceState,
    name: String,
) -> Result<(), ConformanceError> {
    let result = find_result(conformance_state, name.trim_matches('"'))?;

    if !result.success() && result.message().starts_with("Connection error: ") {
        Ok(())
    } else {
        Err(step_error(format!(
            "expected a connection error for {name}, got {}",
            result.message()
        )))
    }
}

#[scenario(path = "tests/features/conformance.feature", index = 0)]
fn compliant_api_passes(conformance_state: ConformanceState) {
    let _ = conformance_state;
}

#[scenario(path = "tests/features/conformance.feature", index = 1)]
fn status_without_data_fails(conformance_state: ConformanceState) {
    let _ = conformance_state;
}

#[scenario(path = "tests/features/conformance.feature", index = 2)]
fn duplicate_vote_passes(conformance_state: ConformanceState) {
    let _ = conformance_state;
}

#[scenario(path = "tests/features/conformance.feature", index = 3)]
fn other_vote_rejection_fails(conformance_state: ConformanceState) {
    let _ = conformance_state;
}

#[scenario(path = "tests/features/conformance.feature", index = 4)]
fn unreachable_api_fails_everything(conformance_state: ConformanceState) {
    let _ = conformance_state;
}
