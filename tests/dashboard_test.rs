//! End-to-end store tests: HTTP gateway, session file, and route guard
//! Run with: cargo test --test dashboard_test

mod common;

use std::sync::Arc;

use shop_admin::domain::entities::{ProductDraft, ProductPatch};
use shop_admin::domain::routes::{Navigation, Route};
use shop_admin::domain::traits::{CatalogGateway, KeyValueStore};
use shop_admin::infrastructure::api::FakeStoreClient;
use shop_admin::infrastructure::storage::JsonFileStore;
use shop_admin::{AppState, Config};

fn config(base_url: &str, dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.api = common::api_config(base_url);
    config.session.path = dir.path().join("session.json");
    config
}

#[tokio::test]
async fn test_session_survives_restart() {
    let base = common::spawn_api().await;
    let dir = tempfile::tempdir().unwrap();

    let first = AppState::new(config(&base, &dir)).await.expect("state");
    assert_eq!(first.navigate(Route::Analytics).await, Navigation::Redirect(Route::Login));
    assert!(first.auth.login("admin@example.com", "secret").await);

    let second = AppState::new(config(&base, &dir)).await.expect("state");
    assert!(second.auth.is_authenticated().await);
    assert_eq!(second.auth.current().await.map(|i| i.name), Some("admin".to_string()));
    assert_eq!(second.navigate(Route::Analytics).await, Navigation::Proceed);

    second.auth.logout().await;
    let third = AppState::new(config(&base, &dir)).await.expect("state");
    assert!(!third.auth.is_authenticated().await);
}

#[tokio::test]
async fn test_corrupt_session_file_means_logged_out() {
    let base = common::spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    JsonFileStore::new(&path).set("user", "{\"email\":").await.unwrap();

    let state = AppState::new(config(&base, &dir)).await.expect("state");
    assert!(!state.auth.is_authenticated().await);

    assert!(state.auth.login("ops@example.com", "pw").await);
    assert!(AppState::new(config(&base, &dir)).await.unwrap().auth.is_authenticated().await);
}

#[tokio::test]
async fn test_analytics_over_http() {
    let base = common::spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config(&base, &dir)).await.unwrap();

    state.analytics.fetch_carts().await;

    let summary = state.analytics.summary().await;
    assert_eq!(summary.total_orders, 3);
    assert_eq!(summary.total_sales, "450.00");
    assert_eq!(summary.average_order_value, "150.00");
    assert_eq!(state.analytics.total_items().await, 11);
    assert!(!state.analytics.loading());
}

#[tokio::test]
async fn test_catalog_overlay_over_http() {
    let base = common::spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config(&base, &dir)).await.unwrap();

    state.products.fetch_products().await;
    state.products.fetch_categories().await;
    assert_eq!(state.products.products().await.len(), 3);
    assert_eq!(state.products.categories().await.len(), 4);

    let created = state
        .products
        .create_product(ProductDraft::new("Wool scarf", 25.0).with_category("men's clothing"))
        .await
        .unwrap();
    assert!(created.id > 1000);
    state
        .products
        .update_product(5, ProductPatch { price: Some(650.0), ..ProductPatch::default() })
        .await
        .unwrap();

    state.products.fetch_products_by_category("men's clothing").await;
    let ids: Vec<u64> = state.products.filtered_products().await.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![created.id, 1]);
    assert_eq!(state.products.filtered_category().await.as_deref(), Some("men's clothing"));

    state.products.fetch_products().await;
    assert_eq!(state.products.find(5).await.map(|p| p.price), Some(650.0));
    assert_eq!(state.products.products().await.len(), 4);
}

#[tokio::test]
async fn test_unreachable_api_sets_store_errors() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let config = config(&base, &dir);
    let gateway: Arc<dyn CatalogGateway> = Arc::new(FakeStoreClient::new(&config.api).unwrap());
    let slot: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.session.path));
    let state = AppState::with_parts(config, gateway, slot).await;

    state.users.fetch_users().await;
    state.analytics.fetch_carts().await;

    assert_eq!(state.users.error().await.as_deref(), Some("Failed to load users"));
    assert_eq!(
        state.analytics.error().await.as_deref(),
        Some("Failed to load analytics data")
    );
    assert!(!state.users.loading());
    assert!(state.users.users().await.is_empty());
}
