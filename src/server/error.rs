use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::SnakeError;

/// Failures a handler can answer with; rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Snake(#[from] SnakeError),

    #[error("game session {0} already has a connected client")]
    SessionBusy(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Snake(SnakeError::InvalidConfig(_) | SnakeError::InvalidDirection(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Snake(SnakeError::NotInitialized(_)) => StatusCode::NOT_FOUND,
            Self::Snake(SnakeError::GridFull { .. }) | Self::SessionBusy(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request failed");

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::ApiError;
    use crate::error::SnakeError;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (
                ApiError::from(SnakeError::InvalidDirection("north".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(SnakeError::InvalidConfig("width".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(SnakeError::NotInitialized("abc".to_owned())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(SnakeError::GridFull {
                    width: 1,
                    height: 1,
                }),
                StatusCode::CONFLICT,
            ),
            (ApiError::SessionBusy("abc".to_owned()), StatusCode::CONFLICT),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error}");
        }
    }
}
