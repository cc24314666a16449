//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{DrawingValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyData,
    EmptyName,
    NameTooLong,
    MalformedShortKey,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyData => "empty_data",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::NameTooLong => "name_too_long",
            ErrorCode::MalformedShortKey => "malformed_short_key",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Unwrap a required body field or report it as missing.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Attach field context to a domain validation failure.
pub(crate) fn drawing_field_error(field: FieldName, err: DrawingValidationError) -> Error {
    let code = match err {
        DrawingValidationError::EmptyData => ErrorCode::EmptyData,
        DrawingValidationError::EmptyName => ErrorCode::EmptyName,
        DrawingValidationError::NameTooLong { .. } => ErrorCode::NameTooLong,
        DrawingValidationError::MalformedShortKey => ErrorCode::MalformedShortKey,
    };
    field_error(field, code, err.to_string())
}

/// Render body deserialisation failures with the shared error schema.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    Error::invalid_request("request body must be a JSON object")
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
        .into()
}
