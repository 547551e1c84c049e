//! Handlers for registration, login and profile lookup

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::auth::Verified;
use crate::error::{KeygateError, Result};
use crate::handlers::rejection::error_response;
use crate::security::AuthTimer;
use crate::security_logger::SecurityEvent;
use crate::server::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Decode a JSON body, mapping any shape mismatch to `MalformedRequest`.
/// The error detail names only the category and position, never body content.
fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        KeygateError::MalformedRequest(format!(
            "{:?} error at line {} column {}",
            e.classify(),
            e.line(),
            e.column()
        ))
    })
}

async fn note_invalid_input(state: &AppState, route: &str, err: &KeygateError) {
    if let KeygateError::MalformedRequest(details) = err {
        state
            .security_logger
            .log_event(SecurityEvent::InvalidInput {
                route: route.to_string(),
                details: details.clone(),
            })
            .await;
    }
}

async fn register(body: &[u8], state: &AppState) -> Result<()> {
    let request: RegisterRequest = parse_json(body)?;

    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(KeygateError::MalformedRequest(
            "email and password must not be empty".to_string(),
        ));
    }

    match state
        .store
        .register(&request.email, &request.name, &request.password)
        .await
    {
        Ok(()) => {
            log::info!("Registered identity {}", request.email);
            Ok(())
        }
        Err(KeygateError::AlreadyExists) => {
            state
                .security_logger
                .log_event(SecurityEvent::RegistrationConflict {
                    email: request.email,
                })
                .await;
            Err(KeygateError::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

/// POST /register
pub async fn handle_register(body: Bytes, state: AppState) -> std::result::Result<Response, Rejection> {
    match register(&body, &state).await {
        Ok(()) => Ok(StatusCode::CREATED.into_response()),
        Err(e) => {
            note_invalid_input(&state, "/register", &e).await;
            Ok(error_response(&e))
        }
    }
}

async fn login(body: &[u8], state: &AppState) -> Result<LoginResponse> {
    let request: LoginRequest = parse_json(body)?;

    let auth_timer = AuthTimer::new(state.config.auth_min_duration);
    let outcome = state
        .issuer
        .authenticate(state.store.as_ref(), &request.email, &request.password)
        .await;
    auth_timer.wait().await;

    match outcome {
        Ok(issued) => {
            state
                .security_logger
                .log_event(SecurityEvent::AuthenticationSuccess {
                    subject: issued.claims.sub.clone(),
                    token_id: issued.claims.jti.clone(),
                })
                .await;
            Ok(LoginResponse {
                access_token: issued.token,
            })
        }
        Err(KeygateError::InvalidCredentials) => {
            state
                .security_logger
                .log_event(SecurityEvent::AuthenticationFailed {
                    email: request.email,
                })
                .await;
            Err(KeygateError::InvalidCredentials)
        }
        Err(KeygateError::InternalSigningError(detail)) => {
            state
                .security_logger
                .log_event(SecurityEvent::SigningFailure {
                    error: detail.clone(),
                })
                .await;
            Err(KeygateError::InternalSigningError(detail))
        }
        Err(e) => Err(e),
    }
}

/// POST /login
pub async fn handle_login(body: Bytes, state: AppState) -> std::result::Result<Response, Rejection> {
    match login(&body, &state).await {
        Ok(response) => Ok(warp::reply::json(&response).into_response()),
        Err(e) => {
            note_invalid_input(&state, "/login", &e).await;
            Ok(error_response(&e))
        }
    }
}

/// GET /profile, only reachable through the authorization gate
pub async fn handle_profile(
    verified: Verified,
    state: AppState,
) -> std::result::Result<Response, Rejection> {
    match state.store.find(verified.subject()).await {
        Ok(identity) => Ok(warp::reply::json(&identity.profile()).into_response()),
        Err(e) => {
            log::warn!(
                "Verified subject {} is not in the credential store: {}",
                verified.subject(),
                e
            );
            Ok(error_response(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_shape_mismatch() {
        let err = parse_json::<LoginRequest>(br#"{"email": "a@x.com"}"#).unwrap_err();
        assert!(matches!(err, KeygateError::MalformedRequest(_)));

        let err = parse_json::<LoginRequest>(b"not json").unwrap_err();
        assert!(matches!(err, KeygateError::MalformedRequest(_)));
    }

    #[test]
    fn test_parse_json_detail_omits_body() {
        let err = parse_json::<LoginRequest>(br#""hunter2-secret""#).unwrap_err();
        match err {
            KeygateError::MalformedRequest(details) => {
                assert!(!details.contains("hunter2"));
                assert!(details.starts_with("Data error"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = parse_json::<LoginRequest>(br#"{"email": "a@x.com", "password": 7}"#).unwrap_err();
        assert!(!err.to_string().contains("a@x.com"));
    }

    #[test]
    fn test_parse_json_ok() {
        let request: RegisterRequest =
            parse_json(br#"{"email":"a@x.com","name":"A","password":"p"}"#).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.name, "A");
    }
}
