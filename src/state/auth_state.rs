use crate::config::database::Database;
use crate::service::auth_service::{CredentialAuthenticator, DbCredentialAuthenticator};
use crate::service::token_service::TokenService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub(crate) token_service: TokenService,
    pub(crate) authenticator: Arc<dyn CredentialAuthenticator>,
}

impl AuthState {
    pub fn new(db_conn: &Arc<Database>, token_service: TokenService) -> Self {
        Self {
            token_service,
            authenticator: Arc::new(DbCredentialAuthenticator::new(db_conn)),
        }
    }

    pub fn new_with_authenticator(
        token_service: TokenService,
        authenticator: Arc<dyn CredentialAuthenticator>,
    ) -> Self {
        Self {
            token_service,
            authenticator,
        }
    }
}
