//! API error taxonomy.
//!
//! Transport-level failures are classified here (connection, timeout, bad
//! status, undecodable body) but the workflow layer never distinguishes them:
//! every variant collapses into a single user-facing [`Notice`] keyed by the
//! operation that failed. No retries anywhere; the user re-triggers the
//! action to retry.
//!
//! [`Notice`]: crate::notice::Notice

/// Errors from talking to the scheduling API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the API at {0}")]
    Connection(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode API response: {0}")]
    Decode(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a reqwest failure into our taxonomy.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ApiError::Connection(
                err.url().map(|u| u.to_string()).unwrap_or_default(),
            )
        } else if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else {
            ApiError::Decode(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_body() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn connection_error_names_the_url() {
        let err = ApiError::Connection("http://localhost:3001/patients".into());
        assert!(err.to_string().contains("localhost:3001"));
    }
}
