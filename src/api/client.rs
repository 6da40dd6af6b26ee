// src/api/client.rs
//! HTTP transport for the Smartling REST API.
//!
//! A thin wrapper around reqwest that applies bearer authentication,
//! performs the two-tier error normalization (transport failures vs.
//! rejected envelopes), and exposes one method per endpoint. The client
//! is cheap to clone; clones share the underlying connection pool.

use crate::api::envelope::ApiResponseBody;
use crate::api::models::{
    Bindings, ContextInfo, FileInfo, FileUploadData, GlossaryDetails, Items, RetrievalType,
    StringInfo,
};
use crate::api::pagination::paginate;
use crate::config::ClientConfig;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ClientError, FetchFailure, TransportError};
use crate::retry::{retry_with_policy, RetryPolicy};
use crate::types::{
    AccountId, ApiToken, ContextId, FileUri, GlossaryId, LocaleId, ProjectId, ValidationError,
};
use futures::Stream;
use reqwest::header;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------
//
// Paths are built per call from validated identifiers; there are no
// shared URL-template constants.

fn source_strings_path(project: &ProjectId) -> String {
    format!("strings-api/v2/projects/{}/source-strings", project)
}

fn files_list_path(project: &ProjectId) -> String {
    format!("files-api/v2/projects/{}/files/list", project)
}

fn file_upload_path(project: &ProjectId) -> String {
    format!("files-api/v2/projects/{}/file", project)
}

fn file_import_path(project: &ProjectId, locale: &LocaleId) -> String {
    format!(
        "files-api/v2/projects/{}/locales/{}/file/import",
        project, locale
    )
}

fn file_download_path(project: &ProjectId, locale: &LocaleId) -> String {
    format!("files-api/v2/projects/{}/locales/{}/file", project, locale)
}

fn file_delete_path(project: &ProjectId) -> String {
    format!("files-api/v2/projects/{}/file/delete", project)
}

fn contexts_path(project: &ProjectId) -> String {
    format!("context-api/v2/projects/{}/contexts", project)
}

fn context_details_path(project: &ProjectId, context: &ContextId) -> String {
    format!("context-api/v2/projects/{}/contexts/{}", project, context)
}

fn bindings_path(project: &ProjectId) -> String {
    format!("context-api/v2/projects/{}/bindings", project)
}

fn glossary_details_path(account: &AccountId, glossary: &GlossaryId) -> String {
    format!("glossary-api/v2/accounts/{}/glossaries/{}", account, glossary)
}

fn glossary_download_path(account: &AccountId, glossary: &GlossaryId) -> String {
    format!(
        "glossary-api/v2/accounts/{}/glossaries/{}/download",
        account, glossary
    )
}

/// The Smartling API client.
#[derive(Clone)]
pub struct SmartlingClient {
    http: reqwest::Client,
    base_url: String,
    page_size: usize,
    retry: RetryPolicy,
}

impl SmartlingClient {
    /// Builds a client from a resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ValidationError> {
        let http = reqwest::Client::builder()
            .default_headers(Self::create_headers(&config.token)?)
            .timeout(config.timeout)
            .build()
            .map_err(|error| ValidationError::HttpClientBuild {
                reason: error.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            page_size: config.page_size,
            retry: config.retry,
        })
    }

    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, ValidationError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        let mut value = header::HeaderValue::from_str(&auth_header).map_err(|error| {
            ValidationError::InvalidToken {
                reason: format!("not a valid header value: {}", error),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);

        Ok(headers)
    }

    /// The retry policy applied to paginated read operations.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The page size used by paginated streams.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // -----------------------------------------------------------------------
    // Source strings
    // -----------------------------------------------------------------------

    /// Fetches one page of source strings for a file.
    pub async fn get_source_strings(
        &self,
        project: &ProjectId,
        file_uri: &FileUri,
        offset: usize,
        limit: usize,
    ) -> Result<Items<StringInfo>, ClientError> {
        let query = [
            ("fileUri", file_uri.as_str().to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_envelope(&source_strings_path(project), &query)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't get source strings (project: {}, fileUri: {})",
                        project, file_uri
                    ),
                    cause,
                )
            })
    }

    /// All source strings of a file as a lazy, forward-only stream.
    ///
    /// Pages are fetched on demand at the configured page size, each
    /// page fetch wrapped with the configured retry policy. The stream
    /// ends at the collection boundary or at the first unrecovered
    /// failure; it is safe to drop early. Each call starts a fresh
    /// traversal at offset 0.
    pub fn source_strings(
        &self,
        project: &ProjectId,
        file_uri: &FileUri,
    ) -> impl Stream<Item = Result<StringInfo, ClientError>> {
        let client = self.clone();
        let project = project.clone();
        let file_uri = file_uri.clone();
        let page_size = self.page_size;

        paginate(
            move |offset, limit| {
                let client = client.clone();
                let project = project.clone();
                let file_uri = file_uri.clone();
                async move {
                    let policy = client.retry.clone();
                    retry_with_policy(
                        &policy,
                        || {
                            let client = client.clone();
                            let project = project.clone();
                            let file_uri = file_uri.clone();
                            async move {
                                let page = client
                                    .get_source_strings(&project, &file_uri, offset, limit)
                                    .await?;
                                Ok(page.items)
                            }
                        },
                        ClientError::is_retryable,
                    )
                    .await
                }
            },
            page_size,
        )
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    /// Lists the files registered in a project.
    pub async fn get_files(&self, project: &ProjectId) -> Result<Items<FileInfo>, ClientError> {
        self.get_envelope(&files_list_path(project), &[])
            .await
            .map_err(|cause| {
                ClientError::new(format!("Can't get files (project: {})", project), cause)
            })
    }

    /// Downloads a translated file as raw text.
    pub async fn download_file(
        &self,
        project: &ProjectId,
        locale: &LocaleId,
        file_uri: &FileUri,
        include_original_strings: bool,
        retrieval_type: RetrievalType,
    ) -> Result<String, ClientError> {
        let query = [
            ("fileUri", file_uri.as_str().to_string()),
            (
                "includeOriginalStrings",
                include_original_strings.to_string(),
            ),
            ("retrievalType", retrieval_type.to_string()),
        ];
        self.get_text(&file_download_path(project, locale), &query)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't download file: {}, projectId: {}, locale: {}",
                        file_uri, project, locale
                    ),
                    cause,
                )
            })
    }

    /// Downloads the published rendition of a translated file.
    pub async fn download_published_file(
        &self,
        project: &ProjectId,
        locale: &LocaleId,
        file_uri: &FileUri,
        include_original_strings: bool,
    ) -> Result<String, ClientError> {
        self.download_file(
            project,
            locale,
            file_uri,
            include_original_strings,
            RetrievalType::Published,
        )
        .await
    }

    /// Uploads a source file. Not retried: uploads are not idempotent.
    #[allow(clippy::too_many_arguments)]
    pub async fn upload_file(
        &self,
        project: &ProjectId,
        file_uri: &FileUri,
        file_type: &str,
        content: Vec<u8>,
        placeholder_format: Option<&str>,
        placeholder_format_custom: Option<&str>,
    ) -> Result<FileUploadData, ClientError> {
        let mut form = Form::new()
            .text("fileUri", file_uri.as_str().to_string())
            .text("fileType", file_type.to_string())
            .text("smartling.instruction_comments_enabled", "on");
        if let Some(format) = placeholder_format {
            form = form.text("smartling.placeholder_format", format.to_string());
        }
        if let Some(custom) = placeholder_format_custom {
            form = form.text("smartling.placeholder_format_custom", custom.to_string());
        }
        let part = Part::bytes(content).file_name(multipart_file_name(file_uri.as_str()));
        let form = form.part("file", part);

        self.post_multipart(&file_upload_path(project), form)
            .await
            .map_err(|cause| ClientError::new(format!("Can't upload file: {}", file_uri), cause))
    }

    /// Imports an already-translated file for a locale. Not retried.
    #[allow(clippy::too_many_arguments)]
    pub async fn upload_localized_file(
        &self,
        project: &ProjectId,
        locale: &LocaleId,
        file_uri: &FileUri,
        file_type: &str,
        content: Vec<u8>,
        placeholder_format: Option<&str>,
        placeholder_format_custom: Option<&str>,
    ) -> Result<FileUploadData, ClientError> {
        let mut form = Form::new()
            .text("fileUri", file_uri.as_str().to_string())
            .text("fileType", file_type.to_string())
            .text("translationState", "PUBLISHED")
            .text("overwrite", "true");
        if let Some(format) = placeholder_format {
            form = form.text("smartling.placeholder_format", format.to_string());
        }
        if let Some(custom) = placeholder_format_custom {
            form = form.text("smartling.placeholder_format_custom", custom.to_string());
        }
        let part = Part::bytes(content).file_name(multipart_file_name(file_uri.as_str()));
        let form = form.part("file", part);

        self.post_multipart(&file_import_path(project, locale), form)
            .await
            .map_err(|cause| ClientError::new(format!("Can't upload file: {}", file_uri), cause))
    }

    /// Deletes a file from a project. Not retried.
    pub async fn delete_file(
        &self,
        project: &ProjectId,
        file_uri: &FileUri,
    ) -> Result<(), ClientError> {
        let form = Form::new().text("fileUri", file_uri.as_str().to_string());
        self.post_multipart_code(&file_delete_path(project), form)
            .await
            .map_err(|cause| ClientError::new(format!("Can't delete file: {}", file_uri), cause))
    }

    // -----------------------------------------------------------------------
    // Contexts and bindings
    // -----------------------------------------------------------------------

    /// Uploads a visual context image. Not retried.
    pub async fn upload_context(
        &self,
        project: &ProjectId,
        name: &str,
        content: Vec<u8>,
    ) -> Result<ContextInfo, ClientError> {
        let part = Part::bytes(content).file_name(multipart_file_name(name));
        let form = Form::new().part("content", part).text("name", name.to_string());

        self.post_multipart(&contexts_path(project), form)
            .await
            .map_err(|cause| ClientError::new(format!("Can't upload context: {}", name), cause))
    }

    /// Retrieves a visual context by id.
    pub async fn get_context(
        &self,
        project: &ProjectId,
        context: &ContextId,
    ) -> Result<ContextInfo, ClientError> {
        self.get_envelope(&context_details_path(project, context), &[])
            .await
            .map_err(|cause| ClientError::new(format!("Can't get context: {}", context), cause))
    }

    /// Deletes a visual context. Not retried.
    pub async fn delete_context(
        &self,
        project: &ProjectId,
        context: &ContextId,
    ) -> Result<(), ClientError> {
        self.delete(&context_details_path(project, context))
            .await
            .map_err(|cause| ClientError::new(format!("Can't delete context: {}", context), cause))
    }

    /// Binds source strings to a visual context. Not retried.
    pub async fn create_bindings(
        &self,
        project: &ProjectId,
        bindings: &Bindings,
    ) -> Result<(), ClientError> {
        let body = self
            .post_json(&bindings_path(project), bindings)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!("Can't create bindings: {}", bindings_as_json(bindings)),
                    cause,
                )
            })?;
        log::debug!("create bindings: {}", body);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Glossaries
    // -----------------------------------------------------------------------

    /// Retrieves details of an account-level glossary.
    pub async fn get_glossary_details(
        &self,
        account: &AccountId,
        glossary: &GlossaryId,
    ) -> Result<GlossaryDetails, ClientError> {
        self.get_envelope(&glossary_details_path(account, glossary), &[])
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't retrieve glossary details accountId: {}, glossaryId: {}",
                        account, glossary
                    ),
                    cause,
                )
            })
    }

    /// Downloads a glossary as TBX, all locales.
    pub async fn download_glossary_file(
        &self,
        account: &AccountId,
        glossary: &GlossaryId,
    ) -> Result<String, ClientError> {
        let query = [("format", "tbx".to_string())];
        self.get_text(&glossary_download_path(account, glossary), &query)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't download glossary file accountId: {}, glossaryId: {}",
                        account, glossary
                    ),
                    cause,
                )
            })
    }

    /// Downloads a glossary as TBX restricted to one locale.
    pub async fn download_source_glossary_file(
        &self,
        account: &AccountId,
        glossary: &GlossaryId,
        locale: &LocaleId,
    ) -> Result<String, ClientError> {
        let query = [
            ("format", "tbx".to_string()),
            ("localeIds", locale.as_str().to_string()),
        ];
        self.get_text(&glossary_download_path(account, glossary), &query)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't download glossary file accountId: {}, glossaryId: {}, locale: {}",
                        account, glossary, locale
                    ),
                    cause,
                )
            })
    }

    /// Downloads a glossary as TBX with both target and source locales.
    pub async fn download_glossary_file_with_translations(
        &self,
        account: &AccountId,
        glossary: &GlossaryId,
        locale: &LocaleId,
        source_locale: &LocaleId,
    ) -> Result<String, ClientError> {
        let query = [
            ("format", "tbx".to_string()),
            ("localeIds", format!("{},{}", locale, source_locale)),
        ];
        self.get_text(&glossary_download_path(account, glossary), &query)
            .await
            .map_err(|cause| {
                ClientError::new(
                    format!(
                        "Can't download glossary file accountId: {}, glossaryId: {}, locale: {}",
                        account, glossary, locale
                    ),
                    cause,
                )
            })
    }

    // -----------------------------------------------------------------------
    // Request plumbing
    // -----------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchFailure> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(TransportError::Network)?;
        decode_envelope(response).await
    }

    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, FetchFailure> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(TransportError::Network)?;
        let response = require_success(response).await?;
        response
            .text()
            .await
            .map_err(|error| TransportError::Network(error).into())
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, FetchFailure> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Network)?;
        decode_envelope(response).await
    }

    /// Multipart POST whose success carries no payload; only the
    /// envelope code is checked.
    async fn post_multipart_code(&self, path: &str, form: Form) -> Result<(), FetchFailure> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Network)?;
        decode_envelope_code(response).await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String, FetchFailure> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Network)?;
        let response = require_success(response).await?;
        response
            .text()
            .await
            .map_err(|error| TransportError::Network(error).into())
    }

    async fn delete(&self, path: &str) -> Result<(), FetchFailure> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(TransportError::Network)?;
        require_success(response).await?;
        Ok(())
    }
}

/// Rejects non-2xx responses, keeping a truncated body for diagnostics.
async fn require_success(response: reqwest::Response) -> Result<reqwest::Response, FetchFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status,
        body_preview: preview(&body),
    }
    .into())
}

/// Decodes a 2xx body as an envelope and extracts its typed payload.
async fn decode_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, FetchFailure> {
    let response = require_success(response).await?;
    let body = response.text().await.map_err(TransportError::Network)?;
    let parsed: ApiResponseBody<T> = serde_json::from_str(&body).map_err(|error| {
        TransportError::Malformed {
            message: format!("{} (body: {})", error, preview(&body)),
        }
    })?;
    parsed.response.into_data().map_err(FetchFailure::from)
}

/// Decodes a 2xx body as an envelope and checks the code only.
async fn decode_envelope_code(response: reqwest::Response) -> Result<(), FetchFailure> {
    let response = require_success(response).await?;
    let body = response.text().await.map_err(TransportError::Network)?;
    let parsed: ApiResponseBody<serde_json::Value> =
        serde_json::from_str(&body).map_err(|error| TransportError::Malformed {
            message: format!("{} (body: {})", error, preview(&body)),
        })?;
    parsed.response.ensure_success().map_err(FetchFailure::from)
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        return body.to_string();
    }
    let truncated: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    format!("{}...", truncated)
}

/// The API derives the multipart content type from the part filename and
/// maps an uppercase "PNG" extension to application/octet-stream, so the
/// extension is lowercased for the part only. The name sent in other
/// fields is unaffected.
fn multipart_file_name(name: &str) -> String {
    match name.strip_suffix("PNG") {
        Some(stem) => format!("{}png", stem),
        None => name.to_string(),
    }
}

fn bindings_as_json(bindings: &Bindings) -> String {
    serde_json::to_string(bindings).unwrap_or_else(|_| "<unserializable>".to_string())
}
