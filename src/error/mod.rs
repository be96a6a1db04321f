pub(crate) mod authorization_error;
pub(crate) mod db_error;
pub(crate) mod request_error;
pub(crate) mod token_error;
pub(crate) mod user_error;

// Unified application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Authorization(#[from] authorization_error::AuthorizationError),
    #[error(transparent)]
    Token(#[from] token_error::TokenError),
    #[error(transparent)]
    User(#[from] user_error::UserError),
    #[error(transparent)]
    Db(#[from] db_error::DbError),
    #[error(transparent)]
    Request(#[from] request_error::RequestError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::response::app_response::ErrorResponse;
        use axum::http::StatusCode;

        match self {
            AppError::Authorization(error) => error.into_response(),
            AppError::Token(error) => error.into_response(),
            AppError::User(error) => error.into_response(),
            AppError::Db(error) => error.into_response(),
            AppError::Request(error) => error.into_response(),
            AppError::Database(_) => ErrorResponse::send("Database error".to_string())
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}
