// src/api/envelope.rs
//! Response envelope for the Smartling wire format.
//!
//! Every JSON endpoint nests its result under a `response` object
//! carrying a status code, an optional payload, and a list of error
//! descriptors. A 2xx transport status is not sufficient for success:
//! the envelope code must equal `SUCCESS`, and any other value is an
//! operation failure even on a 200.
//!
//! Envelopes are decoded with a payload type known at the call site, so
//! each endpoint gets compile-time-typed data without any reflective
//! dispatch.

use crate::constants::API_SUCCESS_CODE;
use crate::error::OperationError;
use serde::{Deserialize, Serialize};

/// Top-level body of a Smartling JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponseBody<T> {
    pub response: ApiEnvelope<T>,
}

/// The envelope itself: status code, payload, structured errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: String,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// One structured error descriptor from the envelope.
///
/// Opaque to the client: carried verbatim into [`OperationError`] for
/// diagnostics, never parsed or interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            key: None,
            message: message.into(),
            details: None,
        }
    }
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope code equals the success sentinel.
    pub fn is_success(&self) -> bool {
        self.code == API_SUCCESS_CODE
    }

    /// Extracts the payload, or the envelope's failure.
    ///
    /// A success envelope with no payload is also a failure: the caller
    /// asked for typed data and the server sent none.
    pub fn into_data(self) -> Result<T, OperationError> {
        if !self.is_success() {
            return Err(OperationError {
                code: self.code,
                errors: self.errors,
            });
        }

        match self.data {
            Some(data) => Ok(data),
            None => Err(OperationError {
                code: self.code,
                errors: vec![ErrorDetail::from_message(
                    "success envelope carried no data payload",
                )],
            }),
        }
    }

    /// Checks the envelope code only, for operations whose success
    /// carries no payload (file delete, bindings creation).
    pub fn ensure_success(self) -> Result<(), OperationError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(OperationError {
                code: self.code,
                errors: self.errors,
            })
        }
    }
}
