use thiserror::Error;

/// Unified error type for all cylera-core operations.
///
/// Each variant corresponds to a distinct failure boundary: config
/// loading, the login endpoint, the transport, and the resource
/// endpoints. Errors always propagate to the caller; nothing in this
/// library downgrades a failure into an empty or default result.
#[derive(Error, Debug)]
pub enum CyleraError {
    /// Required configuration is missing or empty. Raised before any
    /// network call is made.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The login endpoint rejected the credentials or returned a body
    /// the client could not parse. Fatal; never retried automatically.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A resource endpoint returned a non-success status other than 404.
    /// Carries the vendor's status and (truncated) response body.
    #[error("API error {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A single-entity lookup missed (vendor 404). Distinct from an
    /// empty collection result, which is a success.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A success status with a body that is not valid JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl CyleraError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            // Back off to a char boundary; vendor error bodies can
            // contain multi-byte UTF-8.
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..end],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => CyleraError::NotFound(truncated),
            _ => CyleraError::Api {
                status,
                message: truncated,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_404_to_not_found() {
        let err = CyleraError::from_status(StatusCode::NOT_FOUND, "no such device");
        assert!(matches!(err, CyleraError::NotFound(_)));
    }

    #[test]
    fn maps_other_statuses_to_api_error() {
        let err = CyleraError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            CyleraError::Api { status, message } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn truncates_on_a_char_boundary() {
        // 499 ASCII bytes followed by two-byte chars puts the cutoff
        // inside 'é'; truncation must not split it.
        let body = format!("{}{}", "x".repeat(499), "é".repeat(100));
        let err = CyleraError::from_status(StatusCode::BAD_GATEWAY, &body);
        let message = err.to_string();
        assert!(message.contains("truncated"));
        assert!(message.contains(&format!("{} total bytes", body.len())));
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(2000);
        let err = CyleraError::from_status(StatusCode::BAD_GATEWAY, &body);
        let message = err.to_string();
        assert!(message.contains("truncated"));
        assert!(message.contains("2000 total bytes"));
        assert!(message.len() < body.len());
    }
}
