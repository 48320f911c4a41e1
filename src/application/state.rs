//! Application state shared by the views

use std::sync::Arc;

use crate::application::errors::AppError;
use crate::application::stores::{AnalyticsStore, AuthStore, ProductStore, UserStore};
use crate::domain::routes::{guard, Navigation, Route};
use crate::domain::traits::{CatalogGateway, KeyValueStore};
use crate::infrastructure::api::FakeStoreClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::JsonFileStore;

/// One instance of every store, built once and handed to whoever needs it
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn CatalogGateway>,
    pub auth: AuthStore,
    pub products: ProductStore,
    pub users: UserStore,
    pub analytics: AnalyticsStore,
}

impl AppState {
    /// Wire the HTTP gateway and the session file from `config`
    pub async fn new(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let gateway: Arc<dyn CatalogGateway> = Arc::new(FakeStoreClient::new(&config.api)?);
        let slot: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.session.path));
        Ok(Self::with_parts(config, gateway, slot).await)
    }

    /// Build from explicit collaborators. Restores the saved session.
    pub async fn with_parts(
        config: Config,
        gateway: Arc<dyn CatalogGateway>,
        slot: Arc<dyn KeyValueStore>,
    ) -> Self {
        let auth = AuthStore::initialize(slot, config.session.key.clone()).await;
        let products = ProductStore::new(Arc::clone(&gateway), &config.stores);
        let users = UserStore::new(Arc::clone(&gateway), &config.stores);
        let analytics = AnalyticsStore::new(Arc::clone(&gateway), &config.stores);

        Self {
            config,
            gateway,
            auth,
            products,
            users,
            analytics,
        }
    }

    /// Run the navigation guard for `to` against the current session
    pub async fn navigate(&self, to: Route) -> Navigation {
        let navigation = guard(to, self.auth.is_authenticated().await);
        if let Navigation::Redirect(target) = navigation {
            tracing::debug!("Navigation to {} redirected to {}", to, target);
        }
        navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::testing::StubGateway;
    use crate::infrastructure::storage::MemoryStore;

    #[tokio::test]
    async fn test_navigation_follows_session() {
        let slot: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let state = AppState::with_parts(Config::default(), Arc::new(StubGateway::default()), slot).await;

        assert_eq!(state.navigate(Route::Products).await, Navigation::Redirect(Route::Login));
        assert_eq!(state.navigate(Route::Login).await, Navigation::Proceed);

        state.auth.login("admin@example.com", "secret").await;
        assert_eq!(state.navigate(Route::Products).await, Navigation::Proceed);
        assert_eq!(state.navigate(Route::Login).await, Navigation::Redirect(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(matches!(AppState::new(config).await, Err(AppError::Config(_))));
    }
}
