use std::env;

/// Deployment environment. Development renders verbose errors, production conceals
/// internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
    pub log_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: Environment::default(),
            metrics_enabled: true,
            metrics_port: 9090,
            log_dir: "storage/logs".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            environment: env::var("APP_ENV")
                .or_else(|_| env::var("NODE_ENV"))
                .map(|s| Environment::parse(&s))
                .unwrap_or_default(),
            metrics_enabled: env::var("METRICS_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.metrics_enabled),
            metrics_port: env::var("METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.metrics_port),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }
}
