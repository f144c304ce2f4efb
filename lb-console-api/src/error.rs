use serde::{Deserialize, Serialize};

/// Unified error type for all load balancer API operations.
///
/// Every variant carries a human-readable message; callers surface
/// `to_string()` and never branch on transport-level status codes.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The request timed out before the platform answered.
    #[error("Request timed out: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The platform rejected the request. `message` is the server-provided
    /// reason extracted from the response body.
    #[error("{message}")]
    Endpoint {
        /// HTTP status code, kept for logging only.
        status: u16,
        /// Human-readable reason.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid response: {detail}")]
    ParseError {
        /// Error details.
        detail: String,
    },

    /// A record coming back from the platform failed the boundary shape
    /// check (e.g. an option entry without a value).
    #[error("Malformed {what}: {detail}")]
    InvalidShape {
        /// Which record kind was malformed.
        what: String,
        /// Error details.
        detail: String,
    },
}

impl ApiError {
    /// Whether the failure is expected behavior (user-correctable request,
    /// resource missing, etc.), used for log classification.
    ///
    /// Use `warn` level when this returns `true`, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Endpoint { .. })
    }
}

/// API layer Result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;
