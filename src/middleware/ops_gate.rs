use crate::error::authorization_error::AuthorizationError;
use crate::error::token_error::TokenError;
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::service::token_service::TokenServiceTrait;
use crate::state::ops_state::OpsState;
use axum::extract::State;
use axum::{http, http::Request, middleware::Next, response::Response};
use jsonwebtoken::errors::ErrorKind;
use tracing::warn;

const TOKEN_PREFIX: &str = "Bearer ";

/// Gate for the ops surface. Unlike the REST filter this one fails closed:
/// a missing header, an invalid or expired token, or a role set without the
/// operation's required role all reject the call before the handler runs.
pub async fn gate(
    State(state): State<OpsState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(TokenError::MissingToken)?;

    // A raw token without the prefix is accepted as-is
    let token = auth_header.strip_prefix(TOKEN_PREFIX).unwrap_or(auth_header);

    let token_data = state.token_service.retrieve_token_claims(token).map_err(|err| {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::InvalidToken(token.to_string()),
        }
    })?;

    let operation = operation_name(req.uri().path());
    let required = state.policy.required_role(operation).to_string();

    if !token_data.claims.roles.iter().any(|role| role == &required) {
        warn!(
            "Ops call to '{}' denied for subject '{}': missing role {}",
            operation, token_data.claims.sub, required
        );
        return Err(AuthorizationError::AccessDenied { required })?;
    }

    // The principal is scoped to the role that admitted it, not the full
    // claim set
    req.extensions_mut().insert(CurrentUser {
        name: token_data.claims.sub,
        roles: vec![required],
    });

    Ok(next.run(req).await)
}

/// First meaningful path segment, e.g. `/ops/users/42` and `/users/42` both
/// name the `users` operation.
fn operation_name(path: &str) -> &str {
    path.split('/')
        .find(|segment| !segment.is_empty() && *segment != "ops")
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ops_policy::OpsPolicy;
    use crate::service::token_service::TokenService;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn token_service() -> TokenService {
        TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), 600).unwrap()
    }

    fn app_with_policy(policy: OpsPolicy) -> (TokenService, Router) {
        let token_service = token_service();
        let state = OpsState::new(token_service.clone(), policy);
        let router = Router::new()
            .route("/users", get(|| async { "users" }))
            .route("/roles", get(|| async { "roles" }))
            .layer(middleware::from_fn_with_state(state, gate));
        (token_service, router)
    }

    fn app() -> (TokenService, Router) {
        app_with_policy(OpsPolicy::new("ROLE_ADMIN".to_string(), HashMap::new()))
    }

    fn request(uri: &str, authorization: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let (_, app) = app();
        let response = app.oneshot(request("/users", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let (_, app) = app();
        let response = app
            .oneshot(request("/users", Some("Bearer not-a-token".to_string())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let expired =
            TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), -10).unwrap();
        let (_, app) = app();
        let token = expired.issue("admin", &["ROLE_ADMIN".to_string()]).unwrap();
        let response = app
            .oneshot(request("/users", Some(format!("Bearer {}", token.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_without_required_role_is_rejected() {
        let (token_service, app) = app();
        let token = token_service
            .issue("alice", &["ROLE_USER".to_string()])
            .unwrap();
        let response = app
            .oneshot(request("/users", Some(format!("Bearer {}", token.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_token_is_admitted() {
        let (token_service, app) = app();
        let token = token_service
            .issue("admin", &["ROLE_ADMIN".to_string()])
            .unwrap();
        let response = app
            .oneshot(request("/users", Some(format!("Bearer {}", token.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_raw_token_without_prefix_is_accepted() {
        let (token_service, app) = app();
        let token = token_service
            .issue("admin", &["ROLE_ADMIN".to_string()])
            .unwrap();
        let response = app.oneshot(request("/users", Some(token.token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_policy_override_admits_other_role() {
        let mut overrides = HashMap::new();
        overrides.insert("roles".to_string(), "ROLE_USER".to_string());
        let (token_service, app) =
            app_with_policy(OpsPolicy::new("ROLE_ADMIN".to_string(), overrides));

        let token = token_service
            .issue("alice", &["ROLE_USER".to_string()])
            .unwrap();

        // The override admits ROLE_USER on /roles but /users keeps the default
        let response = app
            .clone()
            .oneshot(request("/roles", Some(format!("Bearer {}", token.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request("/users", Some(format!("Bearer {}", token.token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_operation_name_extraction() {
        assert_eq!(operation_name("/ops/users/42"), "users");
        assert_eq!(operation_name("/users/42"), "users");
        assert_eq!(operation_name("/roles"), "roles");
        assert_eq!(operation_name("/"), "");
    }
}
