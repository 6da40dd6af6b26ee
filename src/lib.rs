// src/lib.rs
//! smartling-client: a Rust client for the Smartling TMS REST API.
//!
//! The crate normalizes Smartling's two failure channels (transport
//! failures and "2xx but rejected" envelope responses) into one error
//! taxonomy, applies a configurable retry/backoff policy to transient
//! failures, and exposes offset/limit-paginated collections as lazy
//! streams that fetch pages on demand.
//!
//! # Public API
//!
//! Types are organized by concern:
//! - **Client**: [`SmartlingClient`], one method per endpoint
//! - **Configuration**: [`ClientConfig`], [`RetryPolicy`]
//! - **Errors**: [`ClientError`], [`FetchFailure`], [`TransportError`],
//!   [`OperationError`], [`ValidationError`]
//! - **Pagination**: [`paginate`], [`OffsetPager`]
//! - **Domain types**: [`ProjectId`], [`AccountId`], [`FileUri`],
//!   [`LocaleId`], payload models
//!
//! # Example
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use smartling_client::{ApiToken, ClientConfig, FileUri, ProjectId, SmartlingClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder(ApiToken::new("token")?).build()?;
//! let client = SmartlingClient::new(config)?;
//!
//! let project = ProjectId::new("abc123")?;
//! let file = FileUri::new("strings/app.json")?;
//!
//! let strings: Vec<_> = client.source_strings(&project, &file).try_collect().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
mod config;
mod constants;
mod error;
mod retry;
mod types;

// --- Client ---
pub use crate::api::client::SmartlingClient;

// --- Configuration ---
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::constants::{API_SUCCESS_CODE, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use crate::retry::{retry_with_policy, RetryPolicy};

// --- Error handling ---
pub use crate::error::{ClientError, FetchFailure, OperationError, Result, TransportError};
pub use crate::types::ValidationError;

// --- Pagination ---
pub use crate::api::pagination::{paginate, OffsetPager};

// --- Envelope ---
pub use crate::api::envelope::{ApiEnvelope, ApiResponseBody, ErrorDetail};

// --- Domain payloads ---
pub use crate::api::models::{
    Binding, Bindings, ContextInfo, FileInfo, FileUploadData, GlossaryDetails, Items,
    RetrievalType, StringInfo, StringKey,
};

// --- Domain types ---
pub use crate::types::{
    AccountId, ApiToken, ContextId, FileUri, GlossaryId, LocaleId, ProjectId,
};
