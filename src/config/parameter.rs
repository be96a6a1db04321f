use dotenv;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{error, info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values
const DEFAULTS: &[(&str, &str)] = &[
    ("SERVER_ADDRESS", "127.0.0.1"),
    ("SERVER_PORT", "8080"),
    // Token lifetime is issued-at + 10 hours
    ("JWT_TTL_IN_MINUTES", "600"),
    ("BCRYPT_COST", "12"),
    ("DEFAULT_USER_ROLE", "ROLE_USER"),
    ("OPS_DEFAULT_ROLE", "ROLE_ADMIN"),
    ("LOG_LEVEL", "info"),
];

pub fn init() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let mut config = HashMap::new();

    // Load defaults first
    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }

    // Override with environment variables, including keys without a default
    // (DATABASE_URL, JWT_SECRET, OPS_ROLE_OVERRIDES)
    for (key, value) in std::env::vars() {
        config.insert(key, value);
    }

    if CONFIG.set(config).is_err() {
        error!("Configuration already initialized");
    } else {
        info!("Configuration initialized successfully");
    }
}

pub fn get(parameter: &str) -> String {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
        .unwrap_or_else(|| {
            error!("Configuration parameter '{}' not found", parameter);
            panic!("Required configuration parameter '{}' is missing", parameter);
        })
}

pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
}

pub fn get_i64(parameter: &str) -> i64 {
    let value = get(parameter);
    value.parse::<i64>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid i64: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid i64", parameter);
    })
}

pub fn get_u32(parameter: &str) -> u32 {
    let value = get(parameter);
    value.parse::<u32>().unwrap_or_else(|_| {
        error!("Configuration parameter '{}' is not a valid u32: {}", parameter, value);
        panic!("Configuration parameter '{}' is not a valid u32", parameter);
    })
}
