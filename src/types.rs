// src/types.rs
//! Validated domain newtypes for Smartling identifiers.
//!
//! Strong typing prevents the classic mixup bugs of an API client built
//! on bare strings: passing a file URI where a project id belongs, or an
//! account id where a glossary id belongs. Construction validates once;
//! the rest of the crate can rely on the invariants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid API token: {reason}")]
    InvalidToken { reason: String },

    #[error("Invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid page size: {value}, expected at least 1")]
    InvalidPageSize { value: usize },

    #[error("Invalid identifier for {kind}: {reason}")]
    InvalidIdentifier { kind: &'static str, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Can't build HTTP client: {reason}")]
    HttpClientBuild { reason: String },
}

/// Strong typing for Smartling identifiers with phantom types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Names the identifier kind for error messages.
pub trait IdKind {
    const KIND: &'static str;
}

/// Marker types for different identifier kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMarker;

impl IdKind for ProjectMarker {
    const KIND: &'static str = "projectId";
}

impl IdKind for AccountMarker {
    const KIND: &'static str = "accountId";
}

impl IdKind for GlossaryMarker {
    const KIND: &'static str = "glossaryId";
}

impl IdKind for ContextMarker {
    const KIND: &'static str = "contextId";
}

/// Type aliases for specific identifier types.
pub type ProjectId = Id<ProjectMarker>;
pub type AccountId = Id<AccountMarker>;
pub type GlossaryId = Id<GlossaryMarker>;
pub type ContextId = Id<ContextMarker>;

impl<T: IdKind> Id<T> {
    /// Validates and wraps a raw identifier string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let value = value.trim().to_string();

        if value.is_empty() {
            return Err(ValidationError::InvalidIdentifier {
                kind: T::KIND,
                reason: "identifier cannot be empty".to_string(),
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidIdentifier {
                kind: T::KIND,
                reason: "identifier cannot contain whitespace".to_string(),
            });
        }

        Ok(Self {
            value,
            _phantom: PhantomData,
        })
    }
}

impl<T> Id<T> {
    /// Wraps an identifier received from the API (internal use).
    pub(crate) fn from_wire(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the identifier as a string reference.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(value))
    }
}

/// A Smartling API token, kept opaque and redacted in display output.
///
/// Not serializable: the secret only leaves this type through
/// [`ApiToken::as_str`], and construction always goes through the
/// validation in [`ApiToken::new`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new API token with validation.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();

        if token.is_empty() {
            return Err(ValidationError::InvalidToken {
                reason: "API token cannot be empty".to_string(),
            });
        }

        if token.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidToken {
                reason: "API token cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(token))
    }

    /// Get the token as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display output
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "{}...", prefix)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({}...)", self.0.chars().take(4).collect::<String>())
    }
}

/// URI of a file registered in a Smartling project.
///
/// The URI is the file's identity on the remote side, not a filesystem
/// path. It is interpolated into error context so failed operations name
/// the file they were about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileUri(String);

impl FileUri {
    pub fn new(uri: impl Into<String>) -> Result<Self, ValidationError> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(ValidationError::EmptyField("fileUri"));
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Smartling locale identifier, e.g. `fr-FR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleId(String);

impl LocaleId {
    pub fn new(locale: impl Into<String>) -> Result<Self, ValidationError> {
        let locale = locale.into();
        if locale.trim().is_empty() {
            return Err(ValidationError::EmptyField("localeId"));
        }
        Ok(Self(locale))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
