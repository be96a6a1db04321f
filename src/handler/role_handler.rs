use crate::entity::role::Role;
use crate::error::user_error::UserError;
use crate::error::AppError;
use crate::repository::role_repository::RoleRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::state::user_state::UserState;
use axum::extract::{Path, State};

pub async fn list_roles(
    State(state): State<UserState>,
) -> Result<SuccessResponse<Vec<Role>>, AppError> {
    let roles = state.role_repo.all().await?;
    Ok(SuccessResponse::send(roles))
}

pub async fn get_role(
    State(state): State<UserState>,
    Path(name): Path<String>,
) -> Result<SuccessResponse<Role>, AppError> {
    let role = state
        .role_repo
        .find_by_name(name)
        .await?
        .ok_or(UserError::RoleNotFound)?;
    Ok(SuccessResponse::send(role))
}
