//! HTTP handlers for the server.

pub mod print;
pub mod status;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::CleanlinkError;

/// Error returned by handlers, rendered as `{"status":"error","message":...}`.
#[derive(Debug)]
pub struct ApiError(pub CleanlinkError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CleanlinkError::Json(_) | CleanlinkError::UnknownMode(_) => StatusCode::BAD_REQUEST,
            CleanlinkError::Unauthorized => StatusCode::UNAUTHORIZED,
            CleanlinkError::NothingToPrint(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CleanlinkError::Discovery(_) => StatusCode::NOT_FOUND,
            CleanlinkError::OpenFailed { .. }
            | CleanlinkError::WriteFailed { .. }
            | CleanlinkError::Io(_)
            | CleanlinkError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CleanlinkError> for ApiError {
    fn from(err: CleanlinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "error",
            "message": self.0.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Error for a blocking task that panicked or was cancelled.
pub(crate) fn join_error(err: tokio::task::JoinError) -> ApiError {
    ApiError(CleanlinkError::Server(format!("Task error: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CleanlinkError::UnknownMode("x".into()), StatusCode::BAD_REQUEST),
            (CleanlinkError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                CleanlinkError::NothingToPrint(Mode::Label),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CleanlinkError::open_failed("COM3", std::io::Error::other("busy")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (CleanlinkError::Discovery("none".into()), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
