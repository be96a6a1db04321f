use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Access denied: required role {required}")]
    AccessDenied { required: String },
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthorizationError::AccessDenied { .. } => StatusCode::FORBIDDEN,
        };

        ErrorResponse::send(self.to_string()).with_status(status_code).into_response()
    }
}
