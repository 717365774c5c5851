//! Individual conformance checks.
//!
//! Each check issues one request (or a short fixed sequence of requests)
//! through an [`ApiGateway`] and turns the outcome into a [`CheckResult`].
//! Checks never fail: transport and decoding errors become failed results so
//! the suite can always continue with the next check.

use serde_json::{Value, json};

use super::envelope::{Envelope, collection_len, display_value, document_id};
use super::error::ConformanceError;
use super::gateway::{ApiGateway, ApiResponse};
use super::models::{CheckResult, CreatedResource, ResourceKind};

const INVALID_FORMAT: &str = "Invalid response format";

/// Read endpoints re-requested by the envelope consistency sweep.
pub const SWEEP_ENDPOINTS: [&str; 8] = [
    "/health",
    "/",
    "/status",
    "/outfits",
    "/questions",
    "/wallpapers",
    "/wallpapers/categories",
    "/fans/top",
];

/// Result of a check that creates a resource on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationOutcome {
    /// Recorded outcome of the check.
    pub result: CheckResult,
    /// The created entity, when the server confirmed it.
    pub resource: Option<CreatedResource>,
}

impl CreationOutcome {
    fn failed(result: CheckResult) -> Self {
        Self {
            result,
            resource: None,
        }
    }
}

/// `GET /health` must answer 200 with a successful envelope and a message.
#[must_use]
pub fn health_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    message_check(gateway, "Health Check", "/health", "API is healthy")
}

/// `GET /` must answer 200 with a successful envelope and a message.
#[must_use]
pub fn welcome_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    message_check(
        gateway,
        "Welcome Endpoint",
        "/",
        "Welcome message received",
    )
}

/// `GET /status` must answer 200 with a successful envelope carrying a `data`
/// object.
///
/// The reported database state is logged but not asserted.
#[must_use]
pub fn status_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    const NAME: &str = "Status Check";

    guarded(NAME, || {
        let response = gateway.get("/status")?;
        if response.status() != 200 {
            return Ok(unexpected_status(NAME, &response));
        }

        let body = response.json()?;
        let envelope = Envelope::new(&body);
        let Some(data) = envelope
            .data()
            .and_then(Value::as_object)
            .filter(|_| envelope.is_successful())
        else {
            return Ok(CheckResult::failed(NAME, INVALID_FORMAT).with_response(body));
        };

        let database = data
            .get("database")
            .map_or_else(|| "unknown".to_owned(), display_value);
        Ok(CheckResult::passed(NAME, format!("System status OK, DB: {database}")).with_response(body))
    })
}

/// `GET /outfits` must answer with a successful envelope and a collection.
#[must_use]
pub fn list_outfits_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    collection_check(gateway, "Get Outfits", "/outfits", "outfits")
}

/// `GET /questions` must answer with a successful envelope and a collection.
#[must_use]
pub fn list_questions_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    collection_check(gateway, "Get Questions", "/questions", "questions")
}

/// `GET /wallpapers` must answer with a successful envelope and a collection.
#[must_use]
pub fn list_wallpapers_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    collection_check(gateway, "Get Wallpapers", "/wallpapers", "wallpapers")
}

/// `GET /fans/top` must answer with a successful envelope and a collection.
#[must_use]
pub fn top_fans_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    collection_check(gateway, "Get Top Fans", "/fans/top", "top fans")
}

/// `GET /wallpapers/categories` must answer with a collection of categories.
///
/// Unlike the other listings the full body is kept on the result.
#[must_use]
pub fn wallpaper_categories_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    const NAME: &str = "Get Wallpaper Categories";

    guarded(NAME, || {
        let response = gateway.get("/wallpapers/categories")?;
        if response.status() != 200 {
            return Ok(unexpected_status(NAME, &response));
        }

        let body = response.json()?;
        match successful_collection_len(&body) {
            Some(count) => Ok(
                CheckResult::passed(NAME, format!("Retrieved {count} categories"))
                    .with_response(body),
            ),
            None => Ok(CheckResult::failed(NAME, INVALID_FORMAT).with_response(body)),
        }
    })
}

/// `POST /outfits` must answer 201 with the generated `_id`.
#[must_use]
pub fn create_outfit_check<G: ApiGateway + ?Sized>(gateway: &G) -> CreationOutcome {
    creation_check(
        gateway,
        "Create Outfit",
        "/outfits",
        &outfit_payload(),
        ResourceKind::Outfit,
        "Outfit created with ID",
    )
}

/// `POST /questions` must answer 201 with the generated `_id`.
#[must_use]
pub fn submit_question_check<G: ApiGateway + ?Sized>(gateway: &G) -> CreationOutcome {
    creation_check(
        gateway,
        "Submit Question",
        "/questions",
        &question_payload(),
        ResourceKind::Question,
        "Question submitted with ID",
    )
}

/// `POST /fans` must answer 201 with the generated `_id`.
///
/// `run_stamp` (epoch seconds) keeps the username and email unique across
/// repeated runs.
#[must_use]
pub fn create_fan_check<G: ApiGateway + ?Sized>(gateway: &G, run_stamp: i64) -> CreationOutcome {
    creation_check(
        gateway,
        "Create Fan Profile",
        "/fans",
        &fan_payload(run_stamp),
        ResourceKind::Fan,
        "Fan profile created with ID",
    )
}

/// `POST /votes` for an outfit.
///
/// Without an `outfit_id` the first listed outfit is used. A 400 whose `error`
/// mentions "already voted" passes: the server rejected a duplicate vote.
#[must_use]
pub fn vote_check<G: ApiGateway + ?Sized>(gateway: &G, outfit_id: Option<&str>) -> CheckResult {
    const NAME: &str = "Vote for Outfit";

    guarded(NAME, || {
        let target = match outfit_id {
            Some(id) => id.to_owned(),
            None => match first_outfit_id(gateway)? {
                Ok(id) => id,
                Err(result) => return Ok(result),
            },
        };

        let response = gateway.post_json("/votes", &vote_payload(&target))?;
        match response.status() {
            200 => {
                let body = response.json()?;
                if Envelope::new(&body).is_successful() {
                    Ok(CheckResult::passed(
                        NAME,
                        format!("Vote cast successfully for outfit {target}"),
                    )
                    .with_response(body))
                } else {
                    Ok(CheckResult::failed(NAME, "Vote failed").with_response(body))
                }
            }
            400 => {
                let body = response.json()?;
                let error = Envelope::new(&body).error_text().unwrap_or_default();
                if is_duplicate_vote(error) {
                    Ok(
                        CheckResult::passed(NAME, "Duplicate vote prevention working correctly")
                            .with_response(body),
                    )
                } else {
                    let reason = if error.is_empty() { "Unknown error" } else { error };
                    Ok(CheckResult::failed(NAME, format!("HTTP 400: {reason}")).with_response(body))
                }
            }
            _ => Ok(unexpected_status(NAME, &response)),
        }
    })
}

/// `GET /nonexistent` must answer 404 with an unsuccessful envelope.
#[must_use]
pub fn unknown_route_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    const NAME: &str = "404 Error Handling";

    guarded(NAME, || {
        let response = gateway.get("/nonexistent")?;
        if response.status() != 404 {
            return Ok(CheckResult::failed(
                NAME,
                format!("Expected 404, got {}", response.status()),
            ));
        }

        let body = response.json()?;
        if Envelope::new(&body).is_successful() {
            Ok(CheckResult::failed(NAME, "Should return success: false for 404").with_response(body))
        } else {
            Ok(CheckResult::passed(NAME, "Correctly returns 404 for invalid routes").with_response(body))
        }
    })
}

/// `POST /questions` with an empty question must be rejected with 400 or 422.
#[must_use]
pub fn validation_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    const NAME: &str = "Validation Error Handling";

    guarded(NAME, || {
        let response = gateway.post_json("/questions", &json!({ "question": "" }))?;
        if !matches!(response.status(), 400 | 422) {
            return Ok(CheckResult::failed(
                NAME,
                format!("Expected 400/422, got {}", response.status()),
            ));
        }

        let body = response.json()?;
        if Envelope::new(&body).is_successful() {
            Ok(CheckResult::failed(
                NAME,
                "Should return success: false for validation errors",
            )
            .with_response(body))
        } else {
            Ok(CheckResult::passed(NAME, "Correctly validates empty question").with_response(body))
        }
    })
}

/// Re-requests every [`SWEEP_ENDPOINTS`] entry and checks each 200 body
/// against the envelope contract.
///
/// All violations are folded into one result. Non-200 answers are ignored
/// here; the dedicated checks already report them.
#[must_use]
pub fn envelope_sweep_check<G: ApiGateway + ?Sized>(gateway: &G) -> CheckResult {
    const NAME: &str = "Response Format Consistency";

    let mut violations = Vec::new();
    for endpoint in SWEEP_ENDPOINTS {
        match gateway.get(endpoint).and_then(|response| sweep_violations(endpoint, &response)) {
            Ok(found) => violations.extend(found),
            Err(error) => violations.push(format!(
                "{endpoint}: Connection error - {}",
                error.detail()
            )),
        }
    }

    if violations.is_empty() {
        CheckResult::passed(NAME, "All endpoints follow correct JSON format")
    } else {
        CheckResult::failed(NAME, format!("Format issues: {}", violations.join("; ")))
    }
}

/// Returns `true` when a vote rejection reports a duplicate vote.
#[must_use]
pub fn is_duplicate_vote(error: &str) -> bool {
    error.to_lowercase().contains("already voted")
}

/// Request body for the outfit creation check.
#[must_use]
pub fn outfit_payload() -> Value {
    json!({
        "title": "Test Outfit - Elegant Evening",
        "image": "https://images.unsplash.com/photo-1515372039744-b8f02a3ae446?w=400",
        "description": "A beautiful elegant evening outfit for testing",
        "category": "elegant"
    })
}

/// Request body for the question submission check.
#[must_use]
pub fn question_payload() -> Value {
    json!({
        "question": "What's your favorite workout routine for staying in shape?",
        "category": "fitness"
    })
}

/// Request body for the fan profile check, uniquified by `run_stamp`.
#[must_use]
pub fn fan_payload(run_stamp: i64) -> Value {
    json!({
        "username": format!("testfan_{run_stamp}"),
        "email": format!("testfan_{run_stamp}@example.com"),
        "bio": "I'm a huge fan of Stephanie! Love her style and energy.",
        "location": "Los Angeles, CA"
    })
}

fn vote_payload(outfit_id: &str) -> Value {
    json!({ "outfitId": outfit_id, "voteType": "like" })
}

fn message_check<G: ApiGateway + ?Sized>(
    gateway: &G,
    name: &'static str,
    path: &str,
    success_prefix: &str,
) -> CheckResult {
    guarded(name, || {
        let response = gateway.get(path)?;
        if response.status() != 200 {
            return Ok(unexpected_status(name, &response));
        }

        let body = response.json()?;
        let envelope = Envelope::new(&body);
        match envelope.message_text().filter(|_| envelope.is_successful()) {
            Some(message) => Ok(
                CheckResult::passed(name, format!("{success_prefix}: {message}")).with_response(body),
            ),
            None => Ok(CheckResult::failed(name, INVALID_FORMAT).with_response(body)),
        }
    })
}

fn collection_check<G: ApiGateway + ?Sized>(
    gateway: &G,
    name: &'static str,
    path: &str,
    noun: &str,
) -> CheckResult {
    guarded(name, || {
        let response = gateway.get(path)?;
        if response.status() != 200 {
            return Ok(unexpected_status(name, &response));
        }

        let body = response.json()?;
        match successful_collection_len(&body) {
            Some(count) => Ok(CheckResult::passed(name, format!("Retrieved {count} {noun}"))
                .with_response(json!({ "count": count }))),
            None => Ok(CheckResult::failed(name, INVALID_FORMAT).with_response(body)),
        }
    })
}

fn creation_check<G: ApiGateway + ?Sized>(
    gateway: &G,
    name: &'static str,
    path: &str,
    payload: &Value,
    kind: ResourceKind,
    success_prefix: &str,
) -> CreationOutcome {
    attempt_creation(gateway, name, path, payload, kind, success_prefix)
        .unwrap_or_else(|error| CreationOutcome::failed(error_result(name, &error)))
}

fn attempt_creation<G: ApiGateway + ?Sized>(
    gateway: &G,
    name: &str,
    path: &str,
    payload: &Value,
    kind: ResourceKind,
    success_prefix: &str,
) -> Result<CreationOutcome, ConformanceError> {
    let response = gateway.post_json(path, payload)?;
    if response.status() != 201 {
        return Ok(CreationOutcome::failed(unexpected_status(name, &response)));
    }

    let body = response.json()?;
    let envelope = Envelope::new(&body);
    let created_id = envelope
        .data()
        .filter(|_| envelope.is_successful())
        .and_then(document_id);
    let Some(id) = created_id else {
        return Ok(CreationOutcome::failed(
            CheckResult::failed(name, INVALID_FORMAT).with_response(body),
        ));
    };

    Ok(CreationOutcome {
        result: CheckResult::passed(name, format!("{success_prefix}: {id}")).with_response(body),
        resource: Some(CreatedResource::new(kind, id)),
    })
}

/// Looks up the first listed outfit for the vote check.
///
/// The inner `Err` carries the failed result to record when no outfit can be
/// voted for.
fn first_outfit_id<G: ApiGateway + ?Sized>(
    gateway: &G,
) -> Result<Result<String, CheckResult>, ConformanceError> {
    const NAME: &str = "Vote for Outfit";

    let response = gateway.get("/outfits")?;
    if response.status() != 200 {
        return Ok(Err(CheckResult::failed(
            NAME,
            "Could not fetch outfits for voting",
        )));
    }

    let body = response.json()?;
    let envelope = Envelope::new(&body);
    let first = envelope
        .data()
        .filter(|_| envelope.is_successful())
        .and_then(Value::as_array)
        .and_then(|outfits| outfits.first());

    match first {
        Some(outfit) => Ok(document_id(outfit).ok_or_else(|| {
            CheckResult::failed(NAME, "First listed outfit has no _id").with_response(body.clone())
        })),
        None => Ok(Err(CheckResult::failed(
            NAME,
            "No outfits available to vote for",
        ))),
    }
}

fn sweep_violations(endpoint: &str, response: &ApiResponse) -> Result<Vec<String>, ConformanceError> {
    if response.status() != 200 {
        return Ok(Vec::new());
    }
    let body = response.json()?;
    Ok(Envelope::new(&body).violations(endpoint))
}

fn successful_collection_len(body: &Value) -> Option<usize> {
    let envelope = Envelope::new(body);
    envelope
        .data()
        .filter(|_| envelope.is_successful())
        .and_then(collection_len)
}

fn unexpected_status(name: &str, response: &ApiResponse) -> CheckResult {
    CheckResult::failed(name, format!("HTTP {}", response.status())).with_response(response.payload())
}

fn guarded(
    name: &str,
    check: impl FnOnce() -> Result<CheckResult, ConformanceError>,
) -> CheckResult {
    check().unwrap_or_else(|error| error_result(name, &error))
}

fn error_result(name: &str, error: &ConformanceError) -> CheckResult {
    let message = match error {
        ConformanceError::Decode { message } => format!("Invalid JSON body: {message}"),
        other => format!("Connection error: {}", other.detail()),
    };
    tracing::debug!("{name} aborted: {error}");
    CheckResult::failed(name, message)
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
