// src/api/models.rs
//! Domain payload types for the Smartling API.
//!
//! Wire shapes use camelCase; fields the client does not rely on are
//! optional so that additive server changes do not break decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A paginated collection page as returned by list endpoints.
///
/// `total_count` is decoded when present but never used for pagination
/// termination; exhaustion is inferred structurally from page sizes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Which rendition of a translated file to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalType {
    Pending,
    Published,
    Pseudo,
    ContextMatchingInstrumented,
}

impl RetrievalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Pseudo => "pseudo",
            Self::ContextMatchingInstrumented => "contextmatchinginstrumented",
        }
    }
}

impl fmt::Display for RetrievalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One source string of a file, as returned by the strings API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringInfo {
    pub hashcode: String,
    #[serde(default)]
    pub string_variant: Option<String>,
    #[serde(default)]
    pub string_text: Option<String>,
    #[serde(default)]
    pub parsed_string_text: Option<String>,
    #[serde(default)]
    pub keys: Vec<StringKey>,
}

/// Key under which a source string appears in a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringKey {
    pub key: String,
    pub file_uri: String,
}

/// Metadata of a file registered in a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_uri: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub last_uploaded: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_instructions: Option<bool>,
}

/// Result payload of a file upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadData {
    #[serde(default, rename = "overWritten")]
    pub overwritten: Option<bool>,
    #[serde(default)]
    pub string_count: Option<u64>,
    #[serde(default)]
    pub word_count: Option<u64>,
}

/// A visual context attached to a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    pub context_uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub context_type: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Details of an account-level glossary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryDetails {
    pub glossary_uid: String,
    #[serde(default)]
    pub account_uid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_locale_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
}

/// Request body binding source strings to a visual context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bindings {
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub context_uid: String,
    pub string_hashcode: String,
}
