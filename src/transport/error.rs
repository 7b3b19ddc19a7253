//! Transport and service failures

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to the reserving service
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint unreachable or the exchange broke off
    #[error("API request failed: {0}")]
    Request(String),

    #[error("timed out")]
    Timeout,

    /// Body could not be parsed into the expected shape
    #[error("Malformed response body: {0}")]
    MalformedResponse(String),

    /// Request metadata could not be encoded
    #[error("Could not encode request: {0}")]
    Encoding(String),

    /// HTTP client could not be constructed
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// Non-success status from the analysis endpoint; body kept verbatim
    #[error("API request failed: {status} - {body}")]
    Service { status: StatusCode, body: String },

    #[error("Health check failed: {status}")]
    Health { status: StatusCode },
}

impl TransportError {
    /// True when the service answered but reported a failure
    pub fn is_service(&self) -> bool {
        matches!(self, TransportError::Service { .. } | TransportError::Health { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return TransportError::Timeout;
        }
        if e.is_decode() {
            return TransportError::MalformedResponse(describe(&e));
        }
        TransportError::Request(describe(&e))
    }
}

/// Error message followed by its source chain
fn describe(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
