//! HTTP gateway used by the conformance checks.
//!
//! Checks talk to the API through the [`ApiGateway`] trait so they can be
//! exercised against mocks. [`ReqwestGateway`] is the blocking `reqwest`
//! implementation the CLI uses against a live server.

use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use super::error::ConformanceError;

const API_PREFIX: &str = "/api";
const SUITE_USER_AGENT: &str = "FanHub-Test-Suite/1.0";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Root of the Fan Hub API, i.e. the backend URL followed by `/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    root: String,
}

impl ApiBase {
    /// Builds the API root from a backend base URL.
    ///
    /// The URL must parse as an absolute URL. A trailing slash is dropped so
    /// that endpoint paths can be appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::InvalidUrl`] when the value is not a URL.
    pub fn parse(base_url: &str) -> Result<Self, ConformanceError> {
        Url::parse(base_url)
            .map_err(|error| ConformanceError::InvalidUrl(format!("{base_url}: {error}")))?;

        Ok(Self {
            root: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
        })
    }

    /// Returns the absolute URL for an endpoint path such as `/health`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }

    /// Returns the API root as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.root
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Creates a response from a status code and raw body text.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response whose body is the serialised JSON value.
    #[must_use]
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::Decode`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ConformanceError> {
        serde_json::from_str(&self.body).map_err(|error| ConformanceError::Decode {
            message: error.to_string(),
        })
    }

    /// Returns the body for diagnostics: parsed JSON when possible, otherwise
    /// the raw text as a JSON string.
    #[must_use]
    pub fn payload(&self) -> Value {
        self.json()
            .unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

/// Gateway that can issue requests against the Fan Hub API.
#[cfg_attr(test, mockall::automock)]
pub trait ApiGateway {
    /// Sends `GET <api root><path>`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be completed.
    fn get(&self, path: &str) -> Result<ApiResponse, ConformanceError>;

    /// Sends `POST <api root><path>` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be completed.
    fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, ConformanceError>;
}

/// Blocking `reqwest` gateway sharing one client across every call.
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: Client,
    api_base: ApiBase,
}

impl ReqwestGateway {
    /// Builds the gateway with the suite's fixed headers and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::Configuration`] when the HTTP client cannot
    /// be constructed.
    pub fn new(api_base: ApiBase, timeout: Duration) -> Result<Self, ConformanceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(SUITE_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|error| ConformanceError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self { client, api_base })
    }

    /// The API root every request is issued against.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    fn send(request: RequestBuilder) -> Result<ApiResponse, ConformanceError> {
        let response = request
            .send()
            .map_err(|error| ConformanceError::from_transport(&error))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| ConformanceError::from_transport(&error))?;
        Ok(ApiResponse::new(status, body))
    }
}

impl ApiGateway for ReqwestGateway {
    fn get(&self, path: &str) -> Result<ApiResponse, ConformanceError> {
        let url = self.api_base.endpoint(path);
        tracing::debug!("GET {url}");
        Self::send(self.client.get(url))
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, ConformanceError> {
        let url = self.api_base.endpoint(path);
        tracing::debug!("POST {url}");
        Self::send(self.client.post(url).json(body))
    }
}
