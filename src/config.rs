// config.rs

use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::models::build_descriptor::ToolchainConfig;

pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com";

/// Configuration error types
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Error when required environment variable is not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// Error when a variable is present but cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Runtime settings of the forwarder service
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// PostgreSQL connection string for the document store
    pub database_url: String,
    /// Create the `chats` and `users` tables on startup
    pub run_migrations: bool,
    pub bind_addr: SocketAddr,
    /// Path to the Google service account JSON key
    pub credentials_path: String,
    /// Overrides the project id found in the service account key
    pub project_id: Option<String>,
    pub fcm_endpoint: String,
    /// When set, trigger calls must carry a bearer JWT signed with this secret
    pub trigger_secret: Option<String>,
    pub toolchain: ToolchainConfig,
}

impl Config {
    /// Loads configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::EnvVarNotFound(name.to_string()))
        };
        let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let defaults = ToolchainConfig::default();
        let toolchain = ToolchainConfig {
            compile_sdk: parse_or(&lookup, "ANDROID_COMPILE_SDK", defaults.compile_sdk)?,
            target_sdk: parse_or(&lookup, "ANDROID_TARGET_SDK", defaults.target_sdk)?,
            min_sdk: parse_or(&lookup, "ANDROID_MIN_SDK", defaults.min_sdk)?,
            ndk_version: optional("ANDROID_NDK_VERSION").unwrap_or(defaults.ndk_version),
            version_code: parse_or(&lookup, "ANDROID_VERSION_CODE", defaults.version_code)?,
            version_name: optional("ANDROID_VERSION_NAME").unwrap_or(defaults.version_name),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            run_migrations: parse_or(&lookup, "DATABASE_MIGRATE", false)?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", default_bind_addr())?,
            credentials_path: required("GOOGLE_APPLICATION_CREDENTIALS")?,
            project_id: optional("FIREBASE_PROJECT_ID"),
            fcm_endpoint: optional("FCM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_FCM_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            trigger_secret: optional("TRIGGER_SECRET"),
            toolchain,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name).filter(|value| !value.is_empty()) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
