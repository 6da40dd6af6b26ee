// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains. They act
//! as defaults only: every value here is carried into an explicit
//! `ClientConfig` at construction and can be overridden there. No module
//! reads these as shared runtime state.

// ---------------------------------------------------------------------------
// Smartling API boundaries
// ---------------------------------------------------------------------------

/// Root of the Smartling REST API. Overridable through `ClientConfig` so
/// tests can point the client at a local mock server.
pub const DEFAULT_BASE_URL: &str = "https://api.smartling.com";

/// Envelope status code the API uses to signal a successful operation.
///
/// A 2xx transport status is *not* sufficient. The envelope code must
/// equal this sentinel, and any other value is an operation failure.
pub const API_SUCCESS_CODE: &str = "SUCCESS";

/// How many items one page of a paginated collection requests.
///
/// 500 is the largest page the source-strings endpoint serves. Using the
/// maximum minimizes round-trips during bulk export.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Default timeout applied to each HTTP request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Retry defaults
// ---------------------------------------------------------------------------

/// How many times a wrapped operation is attempted before its last
/// failure propagates.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// First retry delay; doubles on each subsequent attempt.
pub const DEFAULT_RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Ceiling for the exponential backoff delay.
pub const DEFAULT_RETRY_MAX_DELAY_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
