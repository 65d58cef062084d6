//! Gateway error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error ({kind}): {message}")]
    Network { kind: &'static str, message: String },

    #[error("Request failed with status {status}")]
    Status { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl GatewayError {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 and 403 answers
    pub fn is_auth_failure(&self) -> bool {
        self.status().is_some_and(is_auth_failure)
    }

    /// The `detail` message of a DRF-style error body, when present
    pub fn detail(&self) -> Option<String> {
        let GatewayError::Status { body, .. } = self else {
            return None;
        };

        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("detail")?
            .as_str()
            .map(str::to_string)
    }

    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connect"
        } else if e.is_request() {
            "request"
        } else if e.is_body() || e.is_decode() {
            "body"
        } else {
            "unknown"
        };

        GatewayError::Network {
            kind,
            message: e.to_string(),
        }
    }
}

pub(crate) fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_body() {
        let err = GatewayError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"detail": "Invalid credentials."}"#.to_string(),
        };
        assert_eq!(err.detail().as_deref(), Some("Invalid credentials."));
        assert!(!err.is_auth_failure());

        let err = GatewayError::Status {
            status: StatusCode::FORBIDDEN,
            body: "<html>forbidden</html>".to_string(),
        };
        assert_eq!(err.detail(), None);
        assert!(err.is_auth_failure());
    }
}
