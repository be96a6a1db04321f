use crate::config::database::Database;
use crate::config::ops_policy::OpsPolicy;
use crate::middleware::auth as auth_middleware;
use crate::middleware::ops_gate;
use crate::routes::{auth, health, ops, profile, register};
use crate::service::token_service::TokenService;
use crate::state::auth_state::AuthState;
use crate::state::ops_state::OpsState;
use crate::state::token_state::TokenState;
use crate::state::user_state::UserState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn routes(db_conn: Arc<Database>, token_service: TokenService) -> Router {
    let auth_state = AuthState::new(&db_conn, token_service.clone());
    let token_state = TokenState::new(token_service.clone());
    let user_state = UserState::new(&db_conn);
    let ops_state = OpsState::new(token_service, OpsPolicy::from_config());

    let api_router = auth::routes()
        .with_state(auth_state)
        .merge(register::routes().with_state(user_state.clone()))
        .merge(profile::routes().layer(ServiceBuilder::new().layer(
            middleware::from_fn_with_state(token_state, auth_middleware::auth),
        )))
        .merge(health::routes());

    let ops_router = ops::routes()
        .with_state(user_state)
        .layer(middleware::from_fn_with_state(ops_state, ops_gate::gate));

    Router::new()
        .nest("/api", api_router)
        .nest("/ops", ops_router)
        .layer(TraceLayer::new_for_http())
}
