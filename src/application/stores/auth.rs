//! Auth session store

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::SessionIdentity;
use crate::domain::traits::KeyValueStore;

/// Holds the logged-in identity and mirrors it into a persistent slot
pub struct AuthStore {
    slot: Arc<dyn KeyValueStore>,
    key: String,
    identity: RwLock<Option<SessionIdentity>>,
}

impl AuthStore {
    /// Create a store with no identity, without reading the slot
    pub fn new(slot: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            identity: RwLock::new(None),
        }
    }

    /// Create a store and restore any identity saved in the slot
    pub async fn initialize(slot: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let store = Self::new(slot, key);
        store.initialize_auth().await;
        store
    }

    /// Restore the identity from the slot. An unreadable or malformed slot
    /// counts as no session.
    pub async fn initialize_auth(&self) {
        let saved = match self.slot.get(&self.key).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to read session slot {:?}: {}", self.key, e);
                return;
            }
        };

        let Some(raw) = saved else {
            tracing::debug!("No saved session");
            return;
        };

        match serde_json::from_str::<SessionIdentity>(&raw) {
            Ok(identity) => {
                tracing::info!("Restored session for {}", identity.email);
                *self.identity.write().await = Some(identity);
            }
            Err(e) => tracing::warn!("Ignoring malformed session in slot {:?}: {}", self.key, e),
        }
    }

    /// Start a session. Any non-empty password is accepted; there is no
    /// credential check.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.is_empty() {
            tracing::debug!("Login rejected: missing email or password");
            return false;
        }

        let identity = SessionIdentity::new(email);
        match serde_json::to_string(&identity) {
            Ok(serialized) => {
                if let Err(e) = self.slot.set(&self.key, &serialized).await {
                    tracing::error!("Failed to persist session: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }

        tracing::info!("Logged in as {}", identity);
        *self.identity.write().await = Some(identity);
        true
    }

    pub async fn logout(&self) {
        *self.identity.write().await = None;
        if let Err(e) = self.slot.delete(&self.key).await {
            tracing::error!("Failed to clear session slot: {}", e);
        }
        tracing::info!("Logged out");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }

    pub async fn current(&self) -> Option<SessionIdentity> {
        self.identity.read().await.clone()
    }
}
