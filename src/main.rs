use crate::config::database::DatabaseTrait;
use crate::config::{database, parameter};
use crate::handler::health_handler;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod dto;
mod entity;
mod error;
mod handler;
mod middleware;
mod repository;
mod response;
mod routes;
mod service;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration first, then the subscriber built from it
    parameter::init();
    config::logging::init();

    info!("Starting flora-api...");

    health_handler::init_start_time();

    let connection = match database::Database::init().await {
        Ok(conn) => {
            info!("Database connection established successfully");
            conn
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    // The signing key is resolved here, once, and handed to every
    // interception point; restarting without JWT_SECRET set invalidates all
    // outstanding tokens
    let token_service = match TokenService::from_config() {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to initialize token service: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    let server_address = parameter::get("SERVER_ADDRESS");
    let server_port = parameter::get("SERVER_PORT");
    let host = format!("{}:{}", server_address, server_port);
    info!("Server will bind to: {}", host);

    let listener = match tokio::net::TcpListener::bind(&host).await {
        Ok(listener) => {
            info!("Server successfully bound to {}", host);
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", host, e);
            return Err(e.into());
        }
    };

    let app = routes::root::routes(Arc::new(connection), token_service);

    info!("Server starting...");
    match axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        Ok(_) => {
            info!("Server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, initiating graceful shutdown..."),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
