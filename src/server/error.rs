use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::FinanceError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Finance(#[from] FinanceError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Finance(e) => match e {
                FinanceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                FinanceError::Duplicate { entity_type, .. } => (
                    StatusCode::BAD_REQUEST,
                    format!("This {} is already registered", entity_type.to_lowercase()),
                ),
                FinanceError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
                FinanceError::NotFound { entity_type, .. } => {
                    (StatusCode::NOT_FOUND, format!("{} not found", entity_type))
                }
                // Details such as file paths stay in the log
                _ => {
                    tracing::error!(error = %e, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// `Json` whose rejection renders as an `{"error": ..}` body
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
