//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field-level movie checks live in the domain validator. This module only
//! covers what the HTTP layer parses itself: the page path segment and the raw
//! JSON body.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use pagination::PageNumber;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Message returned when a request body cannot be parsed as JSON.
pub const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidPage,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidJson => "invalid_json",
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

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_page_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an integer"))
        .with_value(ErrorCode::InvalidPage, value)
}

/// Parse a page path segment.
///
/// Integers of any sign are accepted; out-of-range pages are an empty result,
/// not an error.
pub(crate) fn parse_page_number(value: &str, field: FieldName) -> Result<PageNumber, Error> {
    PageNumber::parse(value).map_err(|_| invalid_page_error(field, value))
}

pub(crate) fn invalid_json_error() -> Error {
    ValidationError::new("body", INVALID_JSON_MESSAGE).with_code(ErrorCode::InvalidJson)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    invalid_json_error().into()
}

/// JSON extractor configuration mapping parse failures into the error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::validation::json_config;
///
/// let app = App::new().app_data(json_config());
/// # let _ = app;
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    const PAGE: FieldName = FieldName::new("pag");

    #[rstest]
    #[case("1", 1)]
    #[case("0", 0)]
    #[case("-3", -3)]
    #[case("99999999999999999999", i64::MAX)]
    fn integer_pages_parse(#[case] raw: &str, #[case] expected: i64) {
        let page = parse_page_number(raw, PAGE).expect("integer page parses");
        assert_eq!(page.get(), expected);
    }

    #[rstest]
    #[case("two")]
    #[case("1.5")]
    #[case("")]
    fn non_integer_pages_are_rejected(#[case] raw: &str) {
        let error = parse_page_number(raw, PAGE).expect_err("non-integer page rejected");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(error.message(), "pag must be an integer");
        let details = error.details().expect("details present");
        assert_eq!(details["field"], Value::from("pag"));
        assert_eq!(details["value"], Value::from(raw));
        assert_eq!(details["code"], Value::from("invalid_page"));
    }

    #[rstest]
    fn invalid_json_points_at_the_body() {
        let error = invalid_json_error();
        assert_eq!(error.message(), INVALID_JSON_MESSAGE);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], Value::from("body"));
        assert_eq!(details["code"], Value::from("invalid_json"));
    }
}
