use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub email: EmailConfig,
    pub carrier: CarrierConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub reset_token_expiry_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub resend_api_key: String,
    pub from_address: String,
    /// Base URL used to build password-reset links in outbound mail.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// Endpoint of the external carrier registry validation service.
    pub validation_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("RESET_TOKEN_EXPIRY_MINUTES") {
            self.security.reset_token_expiry_minutes =
                v.parse().unwrap_or(self.security.reset_token_expiry_minutes);
        }
        if let Ok(v) = env::var("RESEND_API_KEY") {
            self.email.resend_api_key = v;
        }
        if let Ok(v) = env::var("EMAIL_FROM_ADDRESS") {
            self.email.from_address = v;
        }
        if let Ok(v) = env::var("BASE_URL") {
            self.email.base_url = v;
        }
        if let Ok(v) = env::var("CARRIER_VALIDATION_URL") {
            self.carrier.validation_url = v;
        }
        if let Ok(v) = env::var("CARRIER_REQUEST_TIMEOUT") {
            self.carrier.request_timeout_secs =
                v.parse().unwrap_or(self.carrier.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/loadboard".to_string(),
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret-do-not-use-in-production".to_string(),
                jwt_expiry_hours: 24 * 7,
                reset_token_expiry_minutes: 60,
            },
            email: EmailConfig {
                resend_api_key: String::new(),
                from_address: "Loadboard <noreply@loadboard.local>".to_string(),
                base_url: "http://localhost:3000".to_string(),
            },
            carrier: CarrierConfig {
                validation_url: "https://mobile.fmcsa.dot.gov/qc/services/carriers".to_string(),
                request_timeout_secs: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/loadboard_staging".to_string(),
                max_connections: 20,
                connection_timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                reset_token_expiry_minutes: 60,
            },
            email: EmailConfig {
                resend_api_key: String::new(),
                from_address: "Loadboard <noreply@staging.loadboard.app>".to_string(),
                base_url: "https://staging.loadboard.app".to_string(),
            },
            carrier: CarrierConfig {
                validation_url: "https://mobile.fmcsa.dot.gov/qc/services/carriers".to_string(),
                request_timeout_secs: 15,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/loadboard".to_string(),
                max_connections: 50,
                connection_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                reset_token_expiry_minutes: 30,
            },
            email: EmailConfig {
                resend_api_key: String::new(),
                from_address: "Loadboard <noreply@loadboard.app>".to_string(),
                base_url: "https://loadboard.app".to_string(),
            },
            carrier: CarrierConfig {
                validation_url: "https://mobile.fmcsa.dot.gov/qc/services/carriers".to_string(),
                request_timeout_secs: 15,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert!(!config.security.jwt_secret.is_empty());
        assert_eq!(config.security.reset_token_expiry_minutes, 60);
        assert!(!config.environment.is_production());
    }

    #[test]
    fn production_has_no_baked_in_secrets() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.email.resend_api_key.is_empty());
        assert!(config.environment.is_production());
    }
}
