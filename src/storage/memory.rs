//! In-memory credential storage
//!
//! Keeps every identity in a map for the lifetime of the process.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::CredentialStore;
use crate::auth::identity::Identity;
use crate::error::{KeygateError, Result};

/// In-memory identity storage guarded by a single lock
#[derive(Default)]
pub struct MemoryCredentialStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn register(
        &self,
        email: &str,
        display_name: &str,
        secret_credential: &str,
    ) -> Result<()> {
        // Check and insert under one write guard
        let mut identities = self.identities.write().await;

        match identities.entry(email.to_string()) {
            Entry::Occupied(_) => Err(KeygateError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(Identity::new(
                    email.to_string(),
                    display_name.to_string(),
                    secret_credential.to_string(),
                ));
                Ok(())
            }
        }
    }

    async fn find(&self, email: &str) -> Result<Identity> {
        self.identities
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(KeygateError::NotFound)
    }

    async fn len(&self) -> usize {
        self.identities.read().await.len()
    }
}
