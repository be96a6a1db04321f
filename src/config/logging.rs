use crate::config::parameter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment types for log level configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" | "testing" => Environment::Test,
            _ => Environment::Development,
        }
    }
}

fn configured_level() -> Level {
    parameter::get_optional("LOG_LEVEL")
        .and_then(|level| match level.to_lowercase().as_str() {
            "error" => Some(Level::ERROR),
            "warn" => Some(Level::WARN),
            "info" => Some(Level::INFO),
            "debug" => Some(Level::DEBUG),
            "trace" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::INFO)
}

/// Install the global tracing subscriber from LOG_LEVEL / ENV.
///
/// Must run after `parameter::init`. Production environments are clamped to
/// `info` so debug output cannot leak credentials into the log stream.
pub fn init() {
    let environment = parameter::get_optional("ENV")
        .map(|s| Environment::from_str(&s))
        .unwrap_or(Environment::Development);

    let mut level = configured_level();
    if environment == Environment::Production && level > Level::INFO {
        level = Level::INFO;
    }

    let filter = EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        .add_directive(Level::WARN.into());

    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("Logging configured: environment={:?}, level={:?}", environment, level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("prod"), Environment::Production);
        assert_eq!(Environment::from_str("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("anything-else"), Environment::Development);
    }
}
