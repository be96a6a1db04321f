use crate::dto::user_dto::UserLoginDto;
use crate::service::auth_service::AuthError;
use crate::service::token_service::TokenServiceTrait;
use crate::state::auth_state::AuthState;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// `POST /api/auth/login`. Checks credentials through the configured
/// authenticator and answers with a bearer token string.
///
/// Every failure path collapses into the same 401 body; the distinction
/// between bad credentials and internal faults exists only in the server log.
pub async fn login(
    State(state): State<AuthState>,
    Form(payload): Form<UserLoginDto>,
) -> Response {
    info!("Login attempt for user: {}", payload.username);

    match state
        .authenticator
        .authenticate(&payload.username, &payload.password)
        .await
    {
        Ok(user) => match state.token_service.issue(&user.name, &user.roles) {
            Ok(token) => {
                info!("Issued token for user: {}", user.name);
                (StatusCode::OK, token.token).into_response()
            }
            Err(e) => {
                error!("Token issuance failed: {}", e);
                invalid_credentials()
            }
        },
        Err(AuthError::BadCredentials) => {
            warn!("Login failed for user: {}", payload.username);
            invalid_credentials()
        }
        Err(AuthError::Internal(e)) => {
            error!("Unexpected error during authentication: {}", e);
            invalid_credentials()
        }
    }
}

fn invalid_credentials() -> Response {
    (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::auth_service::{AuthenticatedUser, CredentialAuthenticator};
    use crate::service::token_service::TokenService;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubAuthenticator;

    #[async_trait]
    impl CredentialAuthenticator for StubAuthenticator {
        async fn authenticate(
            &self,
            username: &str,
            password: &str,
        ) -> Result<AuthenticatedUser, AuthError> {
            if username == "alice" && password == "pw1" {
                Ok(AuthenticatedUser {
                    name: "alice".to_string(),
                    roles: vec!["ROLE_USER".to_string()],
                })
            } else {
                Err(AuthError::BadCredentials)
            }
        }
    }

    struct BrokenAuthenticator;

    #[async_trait]
    impl CredentialAuthenticator for BrokenAuthenticator {
        async fn authenticate(&self, _: &str, _: &str) -> Result<AuthenticatedUser, AuthError> {
            Err(AuthError::Internal("credential store unavailable".to_string()))
        }
    }

    fn app(authenticator: Arc<dyn CredentialAuthenticator>) -> (TokenService, Router) {
        let token_service =
            TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), 600).unwrap();
        let state = AuthState::new_with_authenticator(token_service.clone(), authenticator);
        let router = Router::new()
            .route("/auth/login", post(login))
            .with_state(state);
        (token_service, router)
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_returns_token_with_roles() {
        let (token_service, app) = app(Arc::new(StubAuthenticator));

        let response = app.oneshot(login_request("alice", "pw1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let token = String::from_utf8(body.to_vec()).unwrap();
        assert!(!token.is_empty());

        assert_eq!(token_service.subject_of(&token).unwrap(), "alice");
        assert_eq!(
            token_service.roles_of(&token).unwrap(),
            vec!["ROLE_USER".to_string()]
        );
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_fixed_401_body() {
        let (_, app) = app(Arc::new(StubAuthenticator));

        let response = app.oneshot(login_request("alice", "wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Invalid username or password");
    }

    #[tokio::test]
    async fn test_internal_error_collapses_into_same_401_body() {
        let (_, app) = app(Arc::new(BrokenAuthenticator));

        let response = app.oneshot(login_request("alice", "pw1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Invalid username or password");
    }
}
