//! Standardized API response types (RFC 7807 compliant for errors).

use lathos_core::ClientError;
use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Application error code for this occurrence, ie `E404`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// A URI reference that identifies the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Identifier the caller can quote when reporting the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            code: None,
            instance: None,
            request_id: None,
        }
    }

    /// Problem body for a client error: its title, detail, code and id.
    pub fn from_client_error(status: u16, err: &dyn ClientError) -> Self {
        Self::new(status, err.title())
            .with_detail(err.detail())
            .with_code(err.code())
            .with_request_id(err.id())
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Generic body for internal faults. Nothing about the cause is exposed.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lathos_core::ErrClient;

    #[test]
    fn test_from_client_error() {
        let err = ErrClient::not_found("E404", "resource 123 does not exist").with_id("req-1");

        let body = ErrorResponse::from_client_error(404, &err).with_instance("/items/123");

        assert_eq!(body.status, 404);
        assert_eq!(body.title, "Not found");
        assert_eq!(body.detail.as_deref(), Some("resource 123 does not exist"));
        assert_eq!(body.code.as_deref(), Some("E404"));
        assert_eq!(body.request_id.as_deref(), Some("req-1"));
        assert_eq!(body.instance.as_deref(), Some("/items/123"));
    }

    #[test]
    fn test_internal_error_skips_empty_fields() {
        let json = serde_json::to_value(ErrorResponse::internal_error().with_request_id("fault-1"))
            .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "about:blank",
                "title": "Internal Server Error",
                "status": 500,
                "request_id": "fault-1",
            })
        );
    }

    #[test]
    fn test_api_response_ok() {
        let response = ApiResponse::ok_with_message(3, "created");

        assert!(response.success);
        assert_eq!(response.data, Some(3));
        assert_eq!(response.message.as_deref(), Some("created"));
    }
}
