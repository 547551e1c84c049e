//! Keygate - a minimal JWT login and profile service
//!
//! Identities register with an email and password, log in for a signed
//! bearer token, and present that token to read their profile.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod security;
pub mod security_logger;
pub mod server;
pub mod storage;

// Re-export main components
pub use config::ServerConfig;
pub use error::{KeygateError, Result};
pub use server::{routes, AppState};
