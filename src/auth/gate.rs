//! Authorization gate for protected routes
//!
//! Verifies bearer tokens issued by [`TokenIssuer`](crate::auth::TokenIssuer)
//! and hands downstream handlers a typed [`Verified`] value.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use warp::Filter;

use crate::auth::token::{extract_bearer_token, Claims};
use crate::config::ServerConfig;
use crate::constants::MAX_TOKEN_LENGTH;
use crate::error::KeygateError;
use crate::security::AuthTimer;
use crate::security_logger::{SecurityEvent, SecurityLogger};

/// Identity proven by a valid bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    subject: String,
}

impl Verified {
    /// Email of the authenticated identity
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Why a request was turned away by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    MissingToken,
    MalformedToken,
    InvalidSignature,
    Expired,
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing bearer token"),
            Self::MalformedToken => write!(f, "malformed token"),
            Self::InvalidSignature => write!(f, "invalid signature or claims"),
            Self::Expired => write!(f, "token expired"),
        }
    }
}

impl From<GateRejection> for KeygateError {
    fn from(_: GateRejection) -> Self {
        KeygateError::Unauthorized
    }
}

/// Verifies signature and expiry of presented tokens
pub struct AuthorizationGate {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthorizationGate {
    /// Creates a gate sharing `secret` with the issuer
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Verify a raw token against the current time
    pub fn verify(&self, token: &str) -> Result<Verified, GateRejection> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a raw token as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Verified, GateRejection> {
        if token.is_empty() {
            return Err(GateRejection::MissingToken);
        }
        if token.len() > MAX_TOKEN_LENGTH || token.chars().any(|c| c.is_control()) {
            return Err(GateRejection::MalformedToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                GateRejection::InvalidSignature
            })?
            .claims;

        if claims.is_expired_at(now) {
            return Err(GateRejection::Expired);
        }
        if claims.sub.is_empty() {
            return Err(GateRejection::InvalidSignature);
        }

        Ok(Verified { subject: claims.sub })
    }

    /// Verify the value of an `Authorization` header
    pub fn verify_header(&self, header: Option<&str>) -> Result<Verified, GateRejection> {
        let header = header.ok_or(GateRejection::MissingToken)?;
        let token = extract_bearer_token(header).ok_or(GateRejection::MissingToken)?;
        self.verify(token)
    }
}

/// Warp filter that only lets requests with a valid bearer token through
pub fn authorized(
    gate: Arc<AuthorizationGate>,
    security_logger: Arc<SecurityLogger>,
    min_duration: Duration,
) -> impl Filter<Extract = (Verified,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let gate = gate.clone();
        let security_logger = security_logger.clone();
        async move {
            let auth_timer = AuthTimer::new(min_duration);
            let outcome = gate.verify_header(header.as_deref());
            auth_timer.wait().await;

            match outcome {
                Ok(verified) => Ok(verified),
                Err(reason) => {
                    security_logger
                        .log_event(SecurityEvent::TokenValidationFailed {
                            reason: reason.to_string(),
                        })
                        .await;
                    Err(warp::reject::custom(KeygateError::from(reason)))
                }
            }
        }
    })
}
