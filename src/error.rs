//! Error taxonomy for the wiki and its mapping onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("404 - Page not found: {0}")]
    PageNotFound(String),

    #[error("400 - Bad method type: {0}")]
    BadMethod(String),

    #[error("404 page not found: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(tera::Error),

    #[error("Failed to load templates: {0}")]
    Template(tera::Error),
}

impl WikiError {
    pub fn status(&self) -> StatusCode {
        match self {
            WikiError::PageNotFound(_) | WikiError::InvalidPath(_) => StatusCode::NOT_FOUND,
            WikiError::BadMethod(_) => StatusCode::BAD_REQUEST,
            WikiError::Io(_) | WikiError::Render(_) | WikiError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WikiError>;
