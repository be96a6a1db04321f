use crate::handler::health_handler;
use axum::{routing::get, Router};

pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler::health_check))
}
