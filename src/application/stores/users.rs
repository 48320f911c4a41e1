//! User directory store

use std::sync::Arc;
use tokio::sync::RwLock;

use super::flash::FlashMessage;
use super::loading::LoadingFlag;
use super::overlay::{LocalOverlay, OverlayWrite};
use crate::application::errors::StoreError;
use crate::domain::entities::{User, UserDraft, UserPatch};
use crate::domain::traits::CatalogGateway;
use crate::infrastructure::config::StoresConfig;

const LOAD_USERS_FAILED: &str = "Failed to load users";
const CREATE_FAILED: &str = "Failed to create user";
const UPDATE_FAILED: &str = "Failed to update user";

struct UserState {
    remote: Vec<User>,
    users: Vec<User>,
    error: Option<String>,
    last_id: u64,
    overlay: LocalOverlay<User>,
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: String,
}

/// Holds fetched users and applies local creates, updates and deletes
pub struct UserStore {
    gateway: Arc<dyn CatalogGateway>,
    state: RwLock<UserState>,
    loading: LoadingFlag,
    flash: FlashMessage,
}

impl UserStore {
    pub fn new(gateway: Arc<dyn CatalogGateway>, config: &StoresConfig) -> Self {
        Self {
            gateway,
            state: RwLock::new(UserState {
                remote: Vec::new(),
                users: Vec::new(),
                error: None,
                last_id: config.user_id_seed,
                overlay: LocalOverlay::new(),
            }),
            loading: LoadingFlag::new(),
            flash: FlashMessage::new(config.flash_ttl()),
        }
    }

    pub async fn fetch_users(&self) {
        let _loading = self.loading.acquire();
        self.state.write().await.error = None;

        match self.gateway.get_users().await {
            Ok(users) => {
                let mut state = self.state.write().await;
                let visible = state.overlay.replay(users.clone(), |_| true);
                state.remote = users;
                state.users = visible;
                tracing::info!("Loaded {} users", state.users.len());
            }
            Err(e) => {
                tracing::error!("{}: {}", LOAD_USERS_FAILED, e);
                self.state.write().await.error = Some(LOAD_USERS_FAILED.to_string());
            }
        }
    }

    /// Add a user locally. Missing address and company default to empty
    /// records.
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, StoreError> {
        self.begin_write().await;
        if let Err(reason) = draft.validate() {
            return Err(self.fail(CREATE_FAILED, StoreError::Validation(reason)).await);
        }

        let user = {
            let mut state = self.state.write().await;
            state.last_id += 1;
            let user = User::from_draft(state.last_id, draft);
            state.users.insert(0, user.clone());
            state.overlay.record(OverlayWrite::Create(user.clone()));
            user
        };

        tracing::info!("Created user {} locally", user);
        self.flash
            .set(format!("User \"{}\" created successfully!", user.username))
            .await;
        Ok(user)
    }

    pub async fn update_user(&self, id: u64, patch: UserPatch) -> Result<User, StoreError> {
        self.begin_write().await;
        if let Err(reason) = patch.validate() {
            return Err(self.fail(UPDATE_FAILED, StoreError::Validation(reason)).await);
        }

        let updated = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            match state.users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.apply(patch);
                    state.overlay.record(OverlayWrite::Update(user.clone()));
                    Some(user.clone())
                }
                None => None,
            }
        };

        let Some(user) = updated else {
            return Err(self.fail(UPDATE_FAILED, StoreError::UserNotFound(id)).await);
        };

        tracing::info!("Updated user {} locally", user);
        self.flash
            .set(format!("User \"{}\" updated successfully!", user.username))
            .await;
        Ok(user)
    }

    pub async fn delete_user(&self, id: u64) -> Option<User> {
        self.begin_write().await;

        let removed = {
            let mut state = self.state.write().await;
            let index = state.users.iter().position(|u| u.id == id);
            let removed = index.map(|index| state.users.remove(index));
            if removed.is_some() {
                state.overlay.record(OverlayWrite::Delete(id));
            }
            removed
        };

        let label = removed
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "the user".to_string());
        tracing::info!("Deleted user {} locally (present: {})", id, removed.is_some());
        self.flash.set(format!("\"{}\" was deleted successfully!", label)).await;
        removed
    }

    pub async fn clear_messages(&self) {
        self.state.write().await.error = None;
        self.flash.clear().await;
    }

    pub async fn discard_local_writes(&self) {
        let mut state = self.state.write().await;
        state.overlay.clear();
        state.users = state.remote.clone();
    }

    pub async fn users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    pub async fn find(&self, id: u64) -> Option<User> {
        self.state.read().await.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn success_message(&self) -> String {
        self.flash.get().await
    }

    pub async fn local_writes(&self) -> usize {
        self.state.read().await.overlay.len()
    }

    pub async fn snapshot(&self) -> UserSnapshot {
        let success_message = self.flash.get().await;
        let state = self.state.read().await;
        UserSnapshot {
            users: state.users.clone(),
            loading: self.loading.is_loading(),
            error: state.error.clone(),
            success_message,
        }
    }

    async fn begin_write(&self) {
        self.state.write().await.error = None;
        self.flash.clear().await;
    }

    async fn fail(&self, message: &str, err: StoreError) -> StoreError {
        tracing::error!("{}: {}", message, err);
        self.state.write().await.error = Some(message.to_string());
        err
    }
}
