use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::error::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Render(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
            AppError::Store(StoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            AppError::Store(StoreError::Other(err)) => {
                tracing::error!(error = %err, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            AppError::Render(err) => {
                tracing::error!(error = %err, "template failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
