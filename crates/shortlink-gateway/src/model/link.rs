use serde::{Deserialize, Serialize};

/// Body of `PUT /generate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    /// The URL to shorten.
    pub long: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
