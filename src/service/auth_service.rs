use crate::config::database::Database;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Outcome of a successful credential check: the identity and the role names
/// to embed in the issued token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub name: String,
    pub roles: Vec<String>,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bad credentials")]
    BadCredentials,
    #[error("Authentication failed: {0}")]
    Internal(String),
}

/// Credential checking capability. The login handler only ever sees this
/// contract; the database-backed implementation below is the production one.
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<AuthenticatedUser, AuthError>;
}

#[derive(Clone)]
pub struct DbCredentialAuthenticator {
    user_repo: UserRepository,
}

impl DbCredentialAuthenticator {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            user_repo: UserRepository::new(db_conn),
        }
    }
}

#[async_trait]
impl CredentialAuthenticator for DbCredentialAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let user = self
            .user_repo
            .find_by_name(username.to_string())
            .await
            .ok_or(AuthError::BadCredentials)?;

        match bcrypt::verify(password, &user.password) {
            Ok(true) => Ok(AuthenticatedUser {
                roles: user.role_names(),
                name: user.name,
            }),
            Ok(false) => {
                warn!("Invalid password attempt for user: {}", user.name);
                Err(AuthError::BadCredentials)
            }
            Err(e) => {
                error!("Password verification system error: {}", e);
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }
}
