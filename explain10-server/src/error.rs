//! Handler error type and its HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use explain10_core::{ErrorCode, GatewayError};

/// Handler error: a classified [`GatewayError`] rendered as the JSON error body.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub GatewayError);

impl ApiError {
    /// HTTP status carried by the underlying error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.0.code == ErrorCode::UnexpectedError {
            tracing::error!(details = ?self.0.details, "Unexpected error while handling request");
        }
        (status, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_gateway_error() {
        assert_eq!(
            ApiError::from(GatewayError::invalid_input("x")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(GatewayError::forbidden(401, "m", "")).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(GatewayError::upstream("x")).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn bogus_status_becomes_internal_error() {
        let err = ApiError::from(GatewayError::upstream("x").with_status(42));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
