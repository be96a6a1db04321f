use crate::dto::user_dto::{UserReadDto, UserRegisterDto};
use crate::error::request_error::ValidatedRequest;
use crate::error::AppError;
use crate::response::app_response::SuccessResponse;
use crate::state::user_state::UserState;
use axum::extract::State;
use axum::http::StatusCode;

/// Open self-registration. The role field is discarded here; self-registered
/// accounts always get the configured default role. Role assignment is an
/// ops-surface operation.
pub async fn register(
    State(state): State<UserState>,
    ValidatedRequest(payload): ValidatedRequest<UserRegisterDto>,
) -> Result<SuccessResponse<UserReadDto>, AppError> {
    let payload = UserRegisterDto { role: None, ..payload };
    let user = state.user_service.create_user(payload).await?;
    Ok(SuccessResponse::send(user).with_status(StatusCode::CREATED))
}
