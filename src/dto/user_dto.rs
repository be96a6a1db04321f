use crate::entity::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Form body for `POST /api/auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserLoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct UserRegisterDto {
    #[validate(length(
        min = 3,
        max = 30,
        message = "Name must be between 3 and 30 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
    #[validate(length(
        max = 50,
        message = "Role must not exceed 50 characters"
    ))]
    pub role: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct UserUpdateDto {
    #[validate(length(
        min = 3,
        max = 30,
        message = "Name must be between 3 and 30 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: Option<String>,
    #[validate(length(
        max = 50,
        message = "Role must not exceed 50 characters"
    ))]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserReadDto {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserReadDto {
    pub fn from(model: User) -> UserReadDto {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl std::fmt::Debug for UserLoginDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User").field("username", &self.username).finish()
    }
}

impl std::fmt::Debug for UserRegisterDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
