use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::error::{KeygateError, Result};
use crate::storage::CredentialStore;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity email)
    pub sub: String,
    /// Expiration time (Unix seconds)
    pub exp: i64,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Unique token id, used to correlate log lines
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Claims for `subject`, valid for `ttl` starting at `issued_at`.
    /// Fails when the expiry is not representable.
    pub fn new(subject: String, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Result<Self> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            KeygateError::InternalSigningError(format!(
                "Token expiry overflows: {} hours after issuance",
                ttl.num_hours()
            ))
        })?;

        Ok(Self {
            sub: subject,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    /// True once `now` has reached the expiry timestamp
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Signs time-limited tokens for authenticated identities
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: chrono::Duration,
}

impl TokenIssuer {
    /// Creates a new issuer with a secret and validity window
    pub fn new(secret: &str, ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl)
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Check the credentials against `store` and issue a token on success.
    ///
    /// Unknown email and wrong credential both yield `InvalidCredentials`.
    pub async fn authenticate(
        &self,
        store: &dyn CredentialStore,
        email: &str,
        secret_credential: &str,
    ) -> Result<IssuedToken> {
        let identity = match store.find(email).await {
            Ok(identity) => identity,
            Err(KeygateError::NotFound) => return Err(KeygateError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !identity.verify(secret_credential) {
            return Err(KeygateError::InvalidCredentials);
        }

        self.issue(identity.email())
    }

    /// Issue a token for `subject` starting now
    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = Claims::new(subject.to_string(), now, self.ttl)?;
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| KeygateError::InternalSigningError(format!("Failed to generate token: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }
}

/// Extracts bearer token from Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
