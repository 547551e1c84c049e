use std::error::Error;
use std::fmt;

use warp::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeygateError {
    // Registration errors
    AlreadyExists,

    // Login errors
    InvalidCredentials,

    // Gate errors
    Unauthorized,

    // Lookup errors
    NotFound,

    // Request errors
    MalformedRequest(String),

    // Token construction errors
    InternalSigningError(String),

    // Configuration errors
    ConfigError(String),
}

impl KeygateError {
    /// HTTP status a handler answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalSigningError(_) | Self::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::MalformedRequest(_) => "malformed_request",
            Self::InternalSigningError(_) | Self::ConfigError(_) => "internal_error",
        }
    }

    /// Message safe to show to a client. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "User with provided email already exists",
            Self::InvalidCredentials => "Email or password is incorrect",
            Self::Unauthorized => "Missing, invalid or expired token",
            Self::NotFound => "User not found",
            Self::MalformedRequest(_) => "Request body is malformed",
            Self::InternalSigningError(_) | Self::ConfigError(_) => "Internal server error",
        }
    }
}

impl fmt::Display for KeygateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "Identity already exists"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Unauthorized => write!(f, "Unauthorized access"),
            Self::NotFound => write!(f, "Identity not found"),
            Self::MalformedRequest(msg) => write!(f, "Malformed request: {}", msg),
            Self::InternalSigningError(msg) => write!(f, "Token signing error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for KeygateError {}

impl warp::reject::Reject for KeygateError {}

// Generic result type for Keygate
pub type Result<T> = std::result::Result<T, KeygateError>;
