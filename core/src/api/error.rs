use crate::error::{DirectoryError, ErrorKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// A [`DirectoryError`] on its way out of a handler.
///
/// Internal failures are logged here and answered with a generic body;
/// store error text never reaches the caller.
#[derive(Debug)]
pub struct ApiError(pub DirectoryError);

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind() {
            ErrorKind::Validation | ErrorKind::Duplicate => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": err.to_string() })),
            )
                .into_response(),
            ErrorKind::Internal => {
                log::error!("request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
