//! HTTP-facing error type shared by all view handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::catalog::{CatalogError, InvalidProduct};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    InvalidProduct(#[from] InvalidProduct),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Catalog(CatalogError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Catalog(CatalogError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Catalog(CatalogError::MissingArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Catalog(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidProduct(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Text shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Catalog(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}
