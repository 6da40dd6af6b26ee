// src/error.rs
//! Client error types with structured error handling.
//!
//! Two independent failure channels exist when talking to Smartling:
//! the HTTP exchange itself can fail (`TransportError`), or the exchange
//! succeeds with a 2xx but the response envelope carries a non-success
//! code (`OperationError`). Both are normalized into a single
//! `ClientError` that names the attempted operation and its identifiers,
//! while the cause chain keeps the two tiers distinguishable for triage:
//! an outage looks different from a business-rule rejection.

use crate::api::envelope::ErrorDetail;
use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level failure: the HTTP exchange did not complete as a
/// well-formed, successful response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body_preview}")]
    Status {
        status: StatusCode,
        /// Truncated response body, kept for diagnostics.
        body_preview: String,
    },

    #[error("malformed response body: {message}")]
    Malformed { message: String },
}

impl TransportError {
    /// Whether this failure is transient and worth retrying.
    ///
    /// Connection resets, timeouts, throttling and server errors are
    /// transient; a response we could not even parse is not, since the
    /// same bytes would come back on the next attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(error) => !error.is_builder() && !error.is_decode(),
            Self::Status { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Malformed { .. } => false,
        }
    }
}

/// Operation-level failure: the transport succeeded with a 2xx, but the
/// response envelope carries a code other than the success sentinel.
///
/// The envelope's error descriptors are carried verbatim and serialized
/// for diagnostics; the client never interprets them.
#[derive(Error, Debug)]
#[error("operation rejected (code: {code}, errors: {})", errors_as_json(.errors))]
pub struct OperationError {
    pub code: String,
    pub errors: Vec<ErrorDetail>,
}

fn errors_as_json(errors: &[ErrorDetail]) -> String {
    serde_json::to_string(errors).unwrap_or_else(|_| format!("{:?}", errors))
}

/// The underlying cause of a failed call, preserving the two-tier
/// distinction between "transport failed" and "transport succeeded but
/// the operation was rejected".
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl FetchFailure {
    /// Default retryable classification: transport failures delegate to
    /// their own classification, rejected operations are never retried
    /// since repeating a logically-rejected request rarely succeeds.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(error) => error.is_retryable(),
            Self::Operation(_) => false,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }
}

/// The error surfaced to callers of every client operation.
///
/// Wraps a [`FetchFailure`] with an operation-context summary: what was
/// attempted and which identifiers were involved (project, file URI,
/// account, locale). The cause stays reachable through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{context}")]
pub struct ClientError {
    context: String,
    #[source]
    cause: FetchFailure,
}

impl ClientError {
    pub fn new(context: impl Into<String>, cause: impl Into<FetchFailure>) -> Self {
        Self {
            context: context.into(),
            cause: cause.into(),
        }
    }

    /// Human-readable summary of the attempted operation.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The underlying two-tier cause.
    pub fn cause(&self) -> &FetchFailure {
        &self.cause
    }

    /// Delegates to the cause's default retryable classification.
    pub fn is_retryable(&self) -> bool {
        self.cause.is_retryable()
    }
}

/// Result type alias for client operations; the error parameter defaults
/// to [`ClientError`] but stays overridable for construction-time code
/// that fails with [`ValidationError`](crate::ValidationError).
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
