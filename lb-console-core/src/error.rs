//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use lb_console_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Collaborator call failed
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The operation needs a piece of context the panel was not given
    #[error("Missing context: {0}")]
    MissingContext(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist,
    /// etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Api(e) => e.is_expected(),
            Self::MissingContext(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
