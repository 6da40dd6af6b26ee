// tests/error_handling.rs
//! Error taxonomy: envelope rejection, transport failures, and the
//! two-tier distinction preserved through normalization.

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use smartling_client::{
    ApiResponseBody, ApiToken, ClientConfig, ClientError, ErrorDetail, FetchFailure, FileUri,
    Items, OperationError, ProjectId, RetryPolicy, StringInfo, TransportError, ValidationError,
};
use std::error::Error as _;

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponseBody<T> {
    serde_json::from_str(body).expect("test body must decode")
}

#[test]
fn rejected_envelope_on_a_2xx_is_an_operation_error() {
    let body = r#"{
        "response": {
            "code": "VALIDATION_ERROR",
            "errors": [
                {"key": "fileUri", "message": "file not found", "details": {"fileUri": "a.json"}}
            ]
        }
    }"#;

    let parsed: ApiResponseBody<Items<StringInfo>> = decode(body);
    let error = parsed.response.into_data().unwrap_err();

    assert_eq!(error.code, "VALIDATION_ERROR");
    assert_eq!(error.errors.len(), 1);
    assert_eq!(error.errors[0].key.as_deref(), Some("fileUri"));
    assert_eq!(error.errors[0].message, "file not found");

    // The rejection is never classified as a transport problem.
    let failure = FetchFailure::from(error);
    assert!(failure.is_operation());
    assert!(!failure.is_transport());
    assert!(!failure.is_retryable());
}

#[test]
fn success_envelope_yields_its_typed_payload() {
    let body = r#"{
        "response": {
            "code": "SUCCESS",
            "data": {
                "items": [{"hashcode": "abc", "stringText": "Hello", "keys": []}],
                "totalCount": 1
            }
        }
    }"#;

    let parsed: ApiResponseBody<Items<StringInfo>> = decode(body);
    let items = parsed.response.into_data().unwrap();

    assert_eq!(items.items.len(), 1);
    assert_eq!(items.items[0].hashcode, "abc");
    assert_eq!(items.items[0].string_text.as_deref(), Some("Hello"));
    assert_eq!(items.total_count, Some(1));
}

#[test]
fn success_code_without_data_is_still_an_operation_error() {
    let body = r#"{"response": {"code": "SUCCESS"}}"#;

    let parsed: ApiResponseBody<Items<StringInfo>> = decode(body);
    let error = parsed.response.into_data().unwrap_err();

    assert_eq!(error.code, "SUCCESS");
    assert!(error.errors[0].message.contains("no data payload"));
}

#[test]
fn code_only_operations_accept_a_payload_free_success() {
    let body = r#"{"response": {"code": "SUCCESS"}}"#;
    let parsed: ApiResponseBody<serde_json::Value> = decode(body);
    assert!(parsed.response.ensure_success().is_ok());

    let body = r#"{"response": {"code": "AUTHENTICATION_ERROR", "errors": []}}"#;
    let parsed: ApiResponseBody<serde_json::Value> = decode(body);
    assert!(parsed.response.ensure_success().is_err());
}

#[test]
fn transport_retryability_follows_status_class() {
    let retryable = [
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::REQUEST_TIMEOUT,
        StatusCode::TOO_MANY_REQUESTS,
    ];
    for status in retryable {
        let error = TransportError::Status {
            status,
            body_preview: String::new(),
        };
        assert!(error.is_retryable(), "{} must be retryable", status);
    }

    let terminal = [
        StatusCode::BAD_REQUEST,
        StatusCode::UNAUTHORIZED,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
    ];
    for status in terminal {
        let error = TransportError::Status {
            status,
            body_preview: String::new(),
        };
        assert!(!error.is_retryable(), "{} must not be retryable", status);
    }

    let malformed = TransportError::Malformed {
        message: "expected value at line 1".to_string(),
    };
    assert!(!malformed.is_retryable());
}

#[test]
fn normalized_error_carries_operation_context_and_keeps_the_cause_chain() {
    let cause = OperationError {
        code: "VALIDATION_ERROR".to_string(),
        errors: vec![ErrorDetail::from_message("bad file type")],
    };
    let error = ClientError::new("Can't upload file: strings/app.json", cause);

    assert_eq!(error.to_string(), "Can't upload file: strings/app.json");
    assert_eq!(error.context(), "Can't upload file: strings/app.json");

    let source = error.source().expect("cause must be chained");
    let rendered = source.to_string();
    assert!(rendered.contains("VALIDATION_ERROR"), "{}", rendered);
    assert!(rendered.contains("bad file type"), "{}", rendered);
}

#[test]
fn the_two_tiers_stay_distinguishable_behind_one_error_type() {
    let transport = ClientError::new(
        "Can't get files (project: p1)",
        TransportError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body_preview: "upstream down".to_string(),
        },
    );
    let operation = ClientError::new(
        "Can't get files (project: p1)",
        OperationError {
            code: "MAINTENANCE_MODE_ERROR".to_string(),
            errors: Vec::new(),
        },
    );

    // Same error kind at the call site, different cause shapes for triage.
    assert!(transport.cause().is_transport());
    assert!(operation.cause().is_operation());
    assert!(transport.is_retryable());
    assert!(!operation.is_retryable());
}

#[test]
fn result_alias_defaults_to_client_error() {
    fn rejected() -> smartling_client::Result<()> {
        Err(ClientError::new(
            "Can't get files (project: p1)",
            OperationError {
                code: "MAINTENANCE_MODE_ERROR".to_string(),
                errors: Vec::new(),
            },
        ))
    }

    let error = rejected().unwrap_err();
    assert!(error.cause().is_operation());
}

#[test]
fn identifier_newtypes_reject_invalid_input() {
    assert!(matches!(
        ProjectId::new(""),
        Err(ValidationError::InvalidIdentifier { kind: "projectId", .. })
    ));
    assert!(matches!(
        ProjectId::new("has space"),
        Err(ValidationError::InvalidIdentifier { kind: "projectId", .. })
    ));
    assert!(ProjectId::new("  abc123  ").is_ok(), "surrounding whitespace is trimmed");

    assert!(matches!(
        FileUri::new("   "),
        Err(ValidationError::EmptyField("fileUri"))
    ));

    assert!(ApiToken::new("tok en").is_err());
    let token = ApiToken::new("supersecretvalue").unwrap();
    assert_eq!(token.to_string(), "supe...", "token display is redacted");
}

#[test]
fn config_builder_validates_page_size_and_base_url() {
    let token = || ApiToken::new("supersecretvalue").unwrap();

    let err = ClientConfig::builder(token()).page_size(0).build().unwrap_err();
    assert!(matches!(err, ValidationError::InvalidPageSize { value: 0 }));

    let err = ClientConfig::builder(token())
        .base_url("not a url")
        .build()
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));

    let err = ClientConfig::builder(token())
        .base_url("ftp://api.example.com")
        .build()
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));

    let config = ClientConfig::builder(token())
        .base_url("https://api.example.com")
        .page_size(100)
        .retry(RetryPolicy::no_retries())
        .build()
        .unwrap();
    assert_eq!(config.page_size, 100);
    assert_eq!(config.retry.max_attempts, 1);
}
