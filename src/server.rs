//! Shared request state and route assembly

use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Reply};

use crate::auth::{authorized, AuthorizationGate, TokenIssuer};
use crate::config::ServerConfig;
use crate::constants::{HEALTH_PATH, LOGIN_PATH, PROFILE_PATH, REGISTER_PATH};
use crate::handlers::{handle_login, handle_profile, handle_register, handle_rejection};
use crate::security::with_api_security_headers;
use crate::security_logger::SecurityLogger;
use crate::storage::{CredentialStore, MemoryCredentialStore};

/// Components every handler needs, cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub issuer: Arc<TokenIssuer>,
    pub gate: Arc<AuthorizationGate>,
    pub security_logger: Arc<SecurityLogger>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by a fresh in-memory credential store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryCredentialStore::new()))
    }

    /// State around an existing store. Issuer and gate both take the
    /// secret from `config`.
    pub fn with_store(config: ServerConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            issuer: Arc::new(TokenIssuer::from_config(&config)),
            gate: Arc::new(AuthorizationGate::from_config(&config)),
            security_logger: Arc::new(SecurityLogger::new()),
            config: Arc::new(config),
        }
    }
}

// Helper function to include the shared state in a request
fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// All public and protected routes, with errors recovered into JSON replies
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let max_body = state.config.max_body_bytes;

    let register = warp::path(REGISTER_PATH)
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handle_register);

    let login = warp::path(LOGIN_PATH)
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handle_login);

    let profile = warp::path(PROFILE_PATH)
        .and(warp::path::end())
        .and(warp::get())
        .and(authorized(
            state.gate.clone(),
            state.security_logger.clone(),
            state.config.auth_min_duration,
        ))
        .and(with_state(state.clone()))
        .and_then(handle_profile);

    let health = warp::path(HEALTH_PATH)
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "OK");

    register
        .or(login)
        .or(profile)
        .or(health)
        .recover(handle_rejection)
        .map(|reply| with_api_security_headers(reply))
}
