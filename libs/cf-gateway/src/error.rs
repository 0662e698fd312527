use crate::envelope::ApiErrorBody;
use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Maximum body preview size for error messages (8KB).
///
/// Non-success responses that are not a Cloud Controller error document are
/// reported with a preview of their body, capped at this size.
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Gateway error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GatewayError {
    /// Request building failed
    #[error("Failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// Invalid header value (user agent or access token)
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Invalid URL (failed to parse or missing host)
    ///
    /// The `reason` field is a diagnostic message for logging only.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUri { url: String, reason: String },

    /// URL scheme rejected by the transport security setting
    #[error("URL scheme '{scheme}' not allowed")]
    InvalidScheme { scheme: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport error (network, connection, etc)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS error
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded size limit
    #[error("Response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// Server answered with a non-2xx status
    ///
    /// `api_code` and `error_code` are filled when the body is a Cloud
    /// Controller error document; otherwise `description` holds a body preview.
    #[error("Server error, status code: {status}, error code: {}, message: {description}", .error_code.as_deref().unwrap_or("unknown"))]
    HttpStatus {
        status: StatusCode,
        api_code: Option<i64>,
        error_code: Option<String>,
        description: String,
    },

    /// Server answered with a success status other than the one the operation expects
    #[error("Unexpected status code: expected {expected}, got {actual}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },

    /// Listing pages did not terminate: a `next_url` repeated or the page cap was hit
    #[error("Invalid pagination at '{url}': {reason}")]
    Pagination { url: String, reason: String },

    /// JSON encoding or decoding failed
    #[error("JSON processing failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// Classify a non-success response.
    ///
    /// The body is parsed as a Cloud Controller error document
    /// (`{"code": .., "description": .., "error_code": ..}`); when that fails the
    /// lossy UTF-8 body is used as the description.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(api) if api.code.is_some() || api.error_code.is_some() => Self::HttpStatus {
                status,
                api_code: api.code,
                error_code: api.error_code,
                description: api.description.unwrap_or_default(),
            },
            _ => Self::HttpStatus {
                status,
                api_code: None,
                error_code: None,
                description: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// Whether the server reported the addressed resource as missing (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

impl From<hyper_util::client::legacy::Error> for GatewayError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        GatewayError::Transport(Box::new(err))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug)]
    struct TestError(&'static str);

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Error for TestError {}

    #[test]
    fn test_classifies_cloud_controller_error_document() {
        let body = br#"{"code": 10000, "description": "Unknown request", "error_code": "CF-NotFound"}"#;
        let err = GatewayError::from_response(StatusCode::NOT_FOUND, body);

        match &err {
            GatewayError::HttpStatus {
                status,
                api_code,
                error_code,
                description,
            } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(*api_code, Some(10000));
                assert_eq!(error_code.as_deref(), Some("CF-NotFound"));
                assert_eq!(description, "Unknown request");
            }
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Server error, status code: 404 Not Found, error code: CF-NotFound, message: Unknown request"
        );
    }

    #[test]
    fn test_non_json_body_becomes_description() {
        let err = GatewayError::from_response(StatusCode::BAD_GATEWAY, b"upstream went away");

        match err {
            GatewayError::HttpStatus {
                api_code,
                error_code,
                description,
                ..
            } => {
                assert_eq!(api_code, None);
                assert_eq!(error_code, None);
                assert_eq!(description, "upstream went away");
            }
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[test]
    fn test_json_without_error_fields_is_kept_verbatim() {
        let err = GatewayError::from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"oops":1}"#);

        match err {
            GatewayError::HttpStatus { description, .. } => {
                assert_eq!(description, r#"{"oops":1}"#);
            }
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[test]
    fn test_status_accessor() {
        let unexpected = GatewayError::UnexpectedStatus {
            expected: StatusCode::CREATED,
            actual: StatusCode::OK,
        };
        assert_eq!(unexpected.status(), Some(StatusCode::OK));
        assert!(!unexpected.is_not_found());

        let timeout = GatewayError::Timeout(Duration::from_secs(1));
        assert_eq!(timeout.status(), None);
    }

    #[test]
    fn test_transport_error_preserves_source() {
        let err = GatewayError::Transport(Box::new(TestError("connection refused")));

        let source = err.source().unwrap();
        let downcast = source.downcast_ref::<TestError>();
        assert_eq!(downcast.unwrap().0, "connection refused");
    }
}
