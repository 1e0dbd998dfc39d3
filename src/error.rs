use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid commodity")]
    InvalidCommodity(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    /// The provider answered, but not with chart data. Carries whatever
    /// JSON it sent so callers can see the provider's own message.
    #[error("Sorry, something went wrong :(")]
    Upstream(Value),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InvalidCommodity(_) => StatusCode::BAD_REQUEST,
            AppError::ExternalApi(_) | AppError::Upstream(_) | AppError::Reqwest(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::SerdeJson(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Join(_) | AppError::Anyhow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let data = match &self {
            AppError::Upstream(payload) => payload.clone(),
            _ => Value::Null,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "data": data,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
