use crate::handler::{role_handler, user_handler};
use crate::state::user_state::UserState;
use axum::routing::get;
use axum::Router;

/// Administrative re-exposure of the user/role operations. The ops gate is
/// layered on in `root`, so nothing here is reachable without the required
/// role.
pub fn routes() -> Router<UserState> {
    Router::<UserState>::new()
        .route(
            "/users",
            get(user_handler::list_users).post(user_handler::create_user),
        )
        .route(
            "/users/{id}",
            get(user_handler::get_user)
                .put(user_handler::update_user)
                .delete(user_handler::delete_user),
        )
        .route("/roles", get(role_handler::list_roles))
        .route("/roles/{name}", get(role_handler::get_role))
}
