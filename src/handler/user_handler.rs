use crate::dto::user_dto::{UserReadDto, UserRegisterDto, UserUpdateDto};
use crate::error::request_error::ValidatedRequest;
use crate::error::AppError;
use crate::response::app_response::SuccessResponse;
use crate::state::user_state::UserState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

pub async fn list_users(
    State(state): State<UserState>,
) -> Result<SuccessResponse<Vec<UserReadDto>>, AppError> {
    let users = state.user_service.all_users().await?;
    Ok(SuccessResponse::send(users))
}

pub async fn get_user(
    State(state): State<UserState>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<UserReadDto>, AppError> {
    let user = state.user_service.find_by_id(id).await?;
    Ok(SuccessResponse::send(UserReadDto::from(user)))
}

pub async fn create_user(
    State(state): State<UserState>,
    ValidatedRequest(payload): ValidatedRequest<UserRegisterDto>,
) -> Result<SuccessResponse<UserReadDto>, AppError> {
    let user = state.user_service.create_user(payload).await?;
    Ok(SuccessResponse::send(user).with_status(StatusCode::CREATED))
}

pub async fn update_user(
    State(state): State<UserState>,
    Path(id): Path<Uuid>,
    ValidatedRequest(payload): ValidatedRequest<UserUpdateDto>,
) -> Result<SuccessResponse<UserReadDto>, AppError> {
    let user = state.user_service.update_user(id, payload).await?;
    Ok(SuccessResponse::send(user))
}

pub async fn delete_user(
    State(state): State<UserState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
