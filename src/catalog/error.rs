//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Uniform error for every catalog request.
///
/// Transport failures and error statuses are classified at the client
/// boundary; views only ever show [`CatalogError::user_message`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request timed out")]
    Timeout,
    #[error("catalog resource not found")]
    NotFound,
    #[error("catalog responded with {0}")]
    Server(StatusCode),
    #[error("could not reach catalog: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed catalog response: {0}")]
    MalformedResponse(String),
    #[error("{0} is required")]
    MissingArgument(&'static str),
    #[error("invalid catalog url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("{0}")]
    Client(String),
}

impl CatalogError {
    /// Message suitable for showing to the shopper inline.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Timeout => {
                "Request timeout. Please check your connection and try again.".to_string()
            }
            CatalogError::NotFound => "The requested resource was not found.".to_string(),
            CatalogError::Server(StatusCode::INTERNAL_SERVER_ERROR) => {
                "Server error. Please try again later.".to_string()
            }
            CatalogError::Server(StatusCode::SERVICE_UNAVAILABLE) => {
                "Service unavailable. Please try again later.".to_string()
            }
            CatalogError::Server(status) => {
                format!("Server error ({}). Please try again.", status.as_u16())
            }
            CatalogError::Network(_) => "Network error. Please check your connection.".to_string(),
            CatalogError::MalformedResponse(_) => "Invalid response format".to_string(),
            CatalogError::MissingArgument(what) => format!("{what} is required"),
            CatalogError::InvalidUrl(_) | CatalogError::Client(_) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }

    /// Classifies an error status returned by the catalog.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => CatalogError::NotFound,
            status => CatalogError::Server(status),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if let Some(status) = err.status() {
            CatalogError::from_status(status)
        } else if err.is_decode() {
            CatalogError::MalformedResponse(err.to_string())
        } else if err.is_builder() {
            CatalogError::Client(err.to_string())
        } else {
            CatalogError::Network(err)
        }
    }
}
