//! Error types for option validation and Snyk API calls.

use thiserror::Error;

/// Errors raised while talking to the Snyk API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The token was rejected (HTTP 401). No later call can succeed.
    #[error("authentication failed: the API token was rejected (HTTP 401): {body}")]
    Unauthorized {
        /// Response body returned by the API.
        body: String,
    },

    /// The organization or project does not exist (HTTP 404).
    #[error("not found (HTTP 404): {body}")]
    NotFound {
        /// Response body returned by the API.
        body: String,
    },

    /// Too many requests (HTTP 429). Not retried.
    #[error("rate limited by the API (HTTP 429): {body}")]
    RateLimited {
        /// Response body returned by the API.
        body: String,
    },

    /// Any other non-success status.
    #[error("request failed with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body returned by the API.
        body: String,
    },

    /// A success status other than the one the endpoint documents.
    #[error("received unexpected status code: {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// Connection, TLS or transport failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON document.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// URL whose response could not be decoded.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured API host or a pagination link is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Map a non-success HTTP status onto the error taxonomy.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized { body },
            404 => Self::NotFound { body },
            429 => Self::RateLimited { body },
            _ => Self::Status { status, body },
        }
    }

    /// Whether the error makes every subsequent call pointless.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Errors in user-supplied options that clap cannot catch on its own.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// A missing, empty or unrecognized option value.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
