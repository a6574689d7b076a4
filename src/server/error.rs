use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::error::ExtractError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("A PDF file is required.")]
    MissingFile,

    #[error("The uploaded file is not a PDF.")]
    NotPdf,

    #[error("Upload too large (limit is {limit} bytes).")]
    PayloadTooLarge { limit: usize },

    #[error("Field '{0}' is too long.")]
    FieldTooLong(String),

    #[error("Field '{0}' is required.")]
    MissingField(String),

    #[error("Field '{0}' is not valid UTF-8.")]
    InvalidEncoding(String),

    #[error("'{name}' must be a page number, got '{value}'.")]
    InvalidNumber { name: String, value: String },

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("blocking thread pool is gone")]
    Blocking,
}

impl From<BlockingError> for ServerError {
    fn from(_: BlockingError) -> Self {
        ServerError::Blocking
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::PayloadTooLarge { .. } | ServerError::FieldTooLong(_) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ServerError::Extract(ExtractError::UnreadablePdf(_)) => StatusCode::BAD_REQUEST,
            ServerError::Extract(e) if e.is_user_error() => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Extract(_) | ServerError::Blocking => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status.is_server_error() {
            log::error!("extraction failed: {}", self);
            "Internal error while extracting pages.".to_string()
        } else {
            log::warn!("rejected request: {}", self);
            self.to_string()
        };

        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}
