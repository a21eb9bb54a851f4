use happyshop_core::ApiError;
use http::StatusCode;
use serde::Deserialize;

/// HTTP-level failures.
#[derive(Debug, thiserror::Error)]
pub enum HttpApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpApiError {
    /// Build a rejection from a non-success response body.
    pub fn rejected(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = serde_json::from_slice::<ErrorBody>(body)
            .map(|b| b.message)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        HttpApiError::Rejected { status, message }
    }
}

impl From<HttpApiError> for ApiError {
    fn from(err: HttpApiError) -> Self {
        match err {
            HttpApiError::Rejected { message, .. } => ApiError::new(message),
            other => ApiError::new(other.to_string()),
        }
    }
}
