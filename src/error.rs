use axum::{
    Json,
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::Envelope;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Query(#[from] libsql::Error),
    #[error("failed to decode row: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("data with id {0} is not found")]
    NotFound(String),
    #[error("Please input a data!")]
    MissingBody,
    #[error("{0}")]
    InvalidBody(String),
    /// The request could not be extracted (bad path segment, unreadable body).
    #[error("{1}")]
    Rejected(StatusCode, String),
    #[error("{0}")]
    Connect(libsql::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            NotFound(_) => StatusCode::NOT_FOUND,
            // Existing clients expect 401 for a bad write payload.
            MissingBody | InvalidBody(_) => StatusCode::UNAUTHORIZED,
            Rejected(status, _) => *status,
            Connect(_) | Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %msg, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), msg = %msg, "request rejected");
        }

        (status, Json(Envelope::error(msg))).into_response()
    }
}
