//! Error types exposed by the conformance layer.

use thiserror::Error;

/// Errors surfaced while configuring the checker or talking to the Fan Hub API.
///
/// Individual checks never propagate these past the suite: each one is turned
/// into a failed [`CheckResult`](super::CheckResult). Only driver-level
/// failures reach the CLI.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConformanceError {
    /// The configured base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The request did not complete before the per-call timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Transport-level error detail.
        message: String,
    },

    /// Networking failed while calling the API.
    #[error("network error talking to the API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body was not the JSON the check expected.
    #[error("response body is not valid JSON: {message}")]
    Decode {
        /// Parser error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ConformanceError {
    /// Maps a `reqwest` transport failure onto the matching variant.
    pub(crate) fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                message: error.to_string(),
            }
        } else {
            Self::Network {
                message: error.to_string(),
            }
        }
    }

    /// Returns the bare detail text without the variant prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidUrl(message)
            | Self::Timeout { message }
            | Self::Network { message }
            | Self::Decode { message }
            | Self::Io { message }
            | Self::Configuration { message } => message,
        }
    }
}
