use thiserror::Error;

/// Why a directory fetch produced no records.
///
/// Callers treat every variant as "no data available"; the variants exist so
/// each can be logged and rendered distinctly.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Directory API returned no data")]
    NoData,
}

/// Maximum length for response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::HttpStatus {
            status: status.as_u16(),
            body: Self::truncate_body(body),
        }
    }

    /// True for failures of the transport or the remote server rather than
    /// of the payload.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_truncates_body() {
        let body = "e".repeat(1000);
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert!(body.starts_with(&"e".repeat(MAX_ERROR_BODY_LENGTH)));
                assert!(body.ends_with("(truncated, 1000 total bytes)"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_is_unavailable() {
        let status = ApiError::HttpStatus { status: 503, body: String::new() };
        assert!(status.is_unavailable());
        assert!(!ApiError::NoData.is_unavailable());
        assert!(!ApiError::Parse("x".into()).is_unavailable());
    }
}
