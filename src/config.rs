//! Server configuration module
//! Handles configuration parameters for the authentication server

use crate::constants::{
    DEFAULT_AUTH_MIN_MILLIS, DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS,
};
use crate::error::{KeygateError, Result};
use std::env;
use std::time::Duration;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JWT secret for token signing/validation
    pub jwt_secret: String,
    /// Validity window of issued tokens
    pub token_ttl: chrono::Duration,
    /// Largest accepted JSON body
    pub max_body_bytes: u64,
    /// Minimum time spent on a login or token check
    pub auth_min_duration: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        panic!("ServerConfig::default() is not allowed for security reasons. Use ServerConfig::from_env() instead.");
    }
}

impl ServerConfig {
    /// Build a configuration around an explicit secret, with default limits
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self> {
        let jwt_secret = jwt_secret.into();
        Self::validate_jwt_secret(&jwt_secret)?;

        Ok(Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret,
            token_ttl: chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            auth_min_duration: Duration::from_millis(DEFAULT_AUTH_MIN_MILLIS),
        })
    }

    /// Validate that a secret meets security requirements
    fn validate_jwt_secret(secret: &str) -> Result<()> {
        if secret.len() < 32 {
            return Err(KeygateError::ConfigError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "secret-phrase",
            "test-secret",
            "default",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(KeygateError::ConfigError(format!(
                    "JWT secret contains insecure pattern '{}'. Please use a secure random secret generated with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(KeygateError::ConfigError(
                "JWT secret should contain mixed characters (letters, numbers, symbols)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("KEYGATE_JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| {
                KeygateError::ConfigError(
                    "JWT_SECRET environment variable is required. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(jwt_secret)?;

        if let Ok(host) = env::var("KEYGATE_HOST") {
            config.host = host;
        }

        if let Some(port) = env::var("KEYGATE_PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }

        let ttl_hours = env::var("KEYGATE_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        config.token_ttl = Self::token_ttl_from_hours(ttl_hours)?;

        if let Some(max_body) = env::var("KEYGATE_MAX_BODY_BYTES")
            .ok()
            .and_then(|b| b.parse().ok())
        {
            config.max_body_bytes = max_body;
        }

        if let Some(millis) = env::var("KEYGATE_AUTH_MIN_MILLIS")
            .ok()
            .and_then(|m| m.parse().ok())
        {
            config.auth_min_duration = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Token lifetime in hours, bounded to `1..=MAX_TOKEN_TTL_HOURS`
    pub fn token_ttl_from_hours(hours: i64) -> Result<chrono::Duration> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
            return Err(KeygateError::ConfigError(format!(
                "KEYGATE_TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        chrono::Duration::try_hours(hours).ok_or_else(|| {
            KeygateError::ConfigError("KEYGATE_TOKEN_TTL_HOURS is out of range".to_string())
        })
    }

    /// Socket address string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
