//! Wiremock stand-in for the Fan Hub API.
//!
//! [`mount_compliant_api`] registers a full set of well-behaved routes.
//! Wiremock answers with the first matching mock in mount order, so
//! scenario-specific overrides must be mounted before calling it.

use std::cell::RefCell;
use std::io;
use std::net::TcpListener;
use std::rc::Rc;

use rstest_bdd::Slot;
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Returns a loopback base URL on which nothing is listening.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be reserved.
pub fn unused_base_url() -> Result<String, io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

/// Mounts `GET <route>` answering `status` with `body`.
pub fn mount_get(runtime: &SharedRuntime, server: &MockServer, route: &str, status: u16, body: &Value) {
    let mock = Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body));
    runtime.block_on(mock.mount(server));
}

/// Mounts `POST <route>` answering `status` with `body`.
pub fn mount_post(runtime: &SharedRuntime, server: &MockServer, route: &str, status: u16, body: &Value) {
    let mock = Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body));
    runtime.block_on(mock.mount(server));
}

/// Mounts every route of a well-behaved Fan Hub API.
pub fn mount_compliant_api(runtime: &SharedRuntime, server: &MockServer) {
    let greeting = json!({"success": true, "message": "Fan Hub API is running"});
    mount_get(runtime, server, "/api/health", 200, &greeting);
    mount_get(runtime, server, "/api/", 200, &greeting);
    mount_get(
        runtime,
        server,
        "/api/status",
        200,
        &json!({"success": true, "data": {"database": "connected"}}),
    );

    let outfits = json!({"success": true, "data": [{"_id": "outfit-listed", "title": "Match day"}]});
    mount_get(runtime, server, "/api/outfits", 200, &outfits);
    for route in [
        "/api/questions",
        "/api/wallpapers",
        "/api/wallpapers/categories",
        "/api/fans/top",
    ] {
        mount_get(runtime, server, route, 200, &json!({"success": true, "data": []}));
    }
    mount_get(
        runtime,
        server,
        "/api/nonexistent",
        404,
        &json!({"success": false, "error": "Route not found"}),
    );

    let rejection = Mock::given(method("POST"))
        .and(path("/api/questions"))
        .and(body_partial_json(json!({"question": ""})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"success": false, "error": "Question is required"})),
        );
    runtime.block_on(rejection.mount(server));

    mount_post(runtime, server, "/api/outfits", 201, &created("outfit-1"));
    mount_post(runtime, server, "/api/questions", 201, &created("question-1"));
    mount_post(runtime, server, "/api/fans", 201, &created("fan-1"));
    mount_post(
        runtime,
        server,
        "/api/votes",
        200,
        &json!({"success": true, "message": "Vote recorded"}),
    );
}

fn created(id: &str) -> Value {
    json!({"success": true, "message": "Created", "data": {"_id": id}})
}
