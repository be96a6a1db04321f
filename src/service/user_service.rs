use crate::config::database::Database;
use crate::config::parameter;
use crate::dto::user_dto::{UserReadDto, UserRegisterDto, UserUpdateDto};
use crate::entity::user::User;
use crate::error::db_error::DbError;
use crate::error::user_error::UserError;
use crate::error::AppError;
use crate::repository::role_repository::{RoleRepository, RoleRepositoryTrait};
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    role_repo: RoleRepository,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            user_repo: UserRepository::new(db_conn),
            role_repo: RoleRepository::new(db_conn),
            bcrypt_cost: parameter::get_u32("BCRYPT_COST"),
        }
    }

    pub async fn create_user(&self, payload: UserRegisterDto) -> Result<UserReadDto, AppError> {
        match self.user_repo.name_exists(payload.name.to_owned()).await {
            Ok(true) => return Err(UserError::UserAlreadyExists)?,
            Ok(false) => {}
            Err(e) => {
                error!("Failed to check name existence: {}", e);
                return Err(AppError::Db(DbError::SomethingWentWrong(
                    "Failed to validate name".to_string(),
                )));
            }
        }

        let role = match payload.role {
            Some(role) => role,
            None => parameter::get("DEFAULT_USER_ROLE"),
        };
        if self.role_repo.find_by_name(role.clone()).await?.is_none() {
            return Err(UserError::RoleNotFound)?;
        }

        let user_id = Uuid::now_v7();
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost)?;

        self.user_repo
            .create(user_id, &payload.name, &hashed_password, &role)
            .await
            .map_err(|e| {
                error!("Failed to insert user: {}", e);
                AppError::Db(DbError::SomethingWentWrong("User creation failed".to_string()))
            })?;

        info!("Created user: {}", payload.name);
        let user = self.find_by_id(user_id).await?;
        Ok(UserReadDto::from(user))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo.find(id).await.map_err(|e| {
            if let sqlx::Error::RowNotFound = e {
                AppError::User(UserError::UserNotFound)
            } else {
                error!("Failed to find user by ID: {}", e);
                AppError::Db(DbError::SomethingWentWrong("Failed to find user".to_string()))
            }
        })
    }

    pub async fn all_users(&self) -> Result<Vec<UserReadDto>, AppError> {
        let users = self.user_repo.all().await.map_err(|e| {
            error!("Failed to list users: {}", e);
            AppError::Db(DbError::SomethingWentWrong("Failed to list users".to_string()))
        })?;
        Ok(users.into_iter().map(UserReadDto::from).collect())
    }

    pub async fn update_user(&self, id: Uuid, payload: UserUpdateDto) -> Result<UserReadDto, AppError> {
        // Existence check first so updates on missing users report 404
        self.find_by_id(id).await?;

        if let Some(role) = &payload.role {
            if self.role_repo.find_by_name(role.clone()).await?.is_none() {
                return Err(UserError::RoleNotFound)?;
            }
        }

        let hashed_password = match &payload.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost)?),
            None => None,
        };

        self.user_repo
            .update(id, payload.name.as_deref(), hashed_password.as_deref(), payload.role.as_deref())
            .await
            .map_err(|e| {
                error!("Failed to update user: {}", e);
                AppError::Db(DbError::SomethingWentWrong("User update failed".to_string()))
            })?;

        let user = self.find_by_id(id).await?;
        Ok(UserReadDto::from(user))
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.find_by_id(id).await?;

        self.user_repo.delete(id).await.map_err(|e| {
            error!("Failed to delete user: {}", e);
            AppError::Db(DbError::SomethingWentWrong("User deletion failed".to_string()))
        })?;

        info!("Deleted user: {}", id);
        Ok(())
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost).map_err(|e| {
        error!("Failed to hash password: {}", e);
        AppError::Db(DbError::SomethingWentWrong("Password hashing failed".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies_round_trip() {
        // Low cost keeps the test fast; production cost comes from config
        let hash = hash_password("correct horse", 4).unwrap();
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-input", 4).unwrap();
        let second = hash_password("same-input", 4).unwrap();
        assert_ne!(first, second);
    }
}
