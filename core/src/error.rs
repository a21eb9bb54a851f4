use serde::{Deserialize, Serialize};

/// Failure of a call to the storefront backend.
///
/// Transport failures and server-side rejections are not distinguished;
/// both carry a human-readable message and surface as the action's error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(format!("Malformed payload: {err}"))
    }
}
