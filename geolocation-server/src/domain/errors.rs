use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Every failure a request can hit, each mapped to exactly one HTTP status at
/// the handler boundary. Provider statuses are carried as `u16` since reqwest
/// and axum sit on different `http` major versions.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidIdentifier(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Error while calling the geolocation provider: {0}.")]
    ProviderUnreachable(String),
    #[error("Error from the geolocation provider: {1}.")]
    ProviderError(u16, String),
    #[error("Unexpected response from the geolocation provider: {0}.")]
    MalformedProviderResponse(String),
    #[error("{0}")]
    StorageError(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ProviderUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ProviderError(status, _) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::MalformedProviderResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
