/// Configuration management for the Digital Hermit backend
use crate::error::{HermitError, HermitResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub database: PathBuf,
}

/// Login security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Failed login attempts before the account is locked
    pub lockout_threshold: i64,
    /// How long a lockout lasts, in minutes
    pub lockout_minutes: i64,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> HermitResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("HERMIT_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("HERMIT_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| HermitError::Validation("Invalid port number".to_string()))?;
        let version = env::var("HERMIT_VERSION").unwrap_or_else(|_| "0.1.0".to_string());

        let data_directory: PathBuf = env::var("HERMIT_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let database = env::var("HERMIT_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("hermit.sqlite"));

        let lockout_threshold = env::var("HERMIT_LOCKOUT_THRESHOLD")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let lockout_minutes = env::var("HERMIT_LOCKOUT_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let session_ttl_hours = env::var("HERMIT_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            storage: StorageConfig {
                data_directory,
                database,
            },
            security: SecurityConfig {
                lockout_threshold,
                lockout_minutes,
                session_ttl_hours,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> HermitResult<()> {
        if self.service.hostname.is_empty() {
            return Err(HermitError::Validation(
                "Hostname cannot be empty".to_string(),
            ));
        }

        if self.security.lockout_threshold < 1 {
            return Err(HermitError::Validation(
                "Lockout threshold must be at least 1".to_string(),
            ));
        }

        if self.security.session_ttl_hours < 1 {
            return Err(HermitError::Validation(
                "Session TTL must be at least 1 hour".to_string(),
            ));
        }

        Ok(())
    }
}
