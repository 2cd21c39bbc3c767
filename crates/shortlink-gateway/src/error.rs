use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortlink_service::LinkError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be decoded.
    BadRequest(String),
    NotFound,
    Service(LinkError),
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        Self::Service(err)
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "link not found".to_string()),
            AppError::Service(LinkError::InvalidArgument(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Service(err @ LinkError::CreateFailed) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Service(err @ LinkError::DeadlineExceeded(_)) => {
                error!(error = %err, "request exceeded its deadline");
                (StatusCode::GATEWAY_TIMEOUT, "request timed out".to_string())
            }
            // Backend details stay in the logs.
            AppError::Service(err @ (LinkError::Store(_) | LinkError::Internal(_))) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
