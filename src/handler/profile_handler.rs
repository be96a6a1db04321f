use crate::middleware::auth::CurrentUser;
use crate::response::app_response::SuccessResponse;
use serde_json::{json, Value};

/// Echoes the principal the bearer filter attached.
pub async fn me(user: CurrentUser) -> SuccessResponse<Value> {
    SuccessResponse::send(json!({
        "name": user.name,
        "roles": user.roles,
    }))
}
