//! Abstract storage interface for registered identities

use async_trait::async_trait;

use crate::auth::identity::Identity;
use crate::error::Result;

/// Keyed collection of identities, unique by email
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new identity. Fails with `AlreadyExists` without touching the
    /// store when `email` is already registered.
    async fn register(&self, email: &str, display_name: &str, secret_credential: &str)
        -> Result<()>;

    /// Look up an identity by email. Fails with `NotFound`.
    async fn find(&self, email: &str) -> Result<Identity>;

    /// Number of stored identities
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
