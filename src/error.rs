use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Errors surfaced by the vocabulary service / 词汇服务错误
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("vocab {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl VocabError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VocabError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VocabError::NotFound(_) => StatusCode::NOT_FOUND,
            VocabError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for VocabError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            VocabError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                // Internal details stay in the log / 内部错误细节只写日志
                "Storage unavailable, please retry".to_string()
            }
            other => {
                tracing::debug!("Request rejected: {}", other);
                other.to_string()
            }
        };
        (status, Html(views::error_fragment(&message))).into_response()
    }
}
