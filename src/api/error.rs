use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{warning, youtube::YoutubeError};

/// Failure of an upstream call. Always rendered as a bare 500; the cause is
/// only written to the console.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub YoutubeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warning!("Upstream call failed: {}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
