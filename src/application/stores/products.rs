//! Product catalog store

use std::sync::Arc;
use tokio::sync::RwLock;

use super::flash::FlashMessage;
use super::loading::LoadingFlag;
use super::overlay::{LocalOverlay, OverlayWrite};
use crate::application::errors::StoreError;
use crate::domain::entities::{Product, ProductDraft, ProductPatch};
use crate::domain::traits::CatalogGateway;
use crate::infrastructure::config::StoresConfig;

const LOAD_PRODUCTS_FAILED: &str = "Failed to load products";
const LOAD_CATEGORIES_FAILED: &str = "Failed to load categories";
const CREATE_FAILED: &str = "Failed to create product";
const UPDATE_FAILED: &str = "Failed to update product";

struct ProductState {
    /// Last collection returned by the API
    remote: Vec<Product>,
    /// Remote collection with local writes replayed on top
    products: Vec<Product>,
    categories: Vec<String>,
    error: Option<String>,
    filtered_category: Option<String>,
    last_id: u64,
    overlay: LocalOverlay<Product>,
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: String,
    pub filtered_category: Option<String>,
}

/// Holds fetched products and applies local creates, updates and deletes
pub struct ProductStore {
    gateway: Arc<dyn CatalogGateway>,
    state: RwLock<ProductState>,
    loading: LoadingFlag,
    flash: FlashMessage,
}

impl ProductStore {
    pub fn new(gateway: Arc<dyn CatalogGateway>, config: &StoresConfig) -> Self {
        Self {
            gateway,
            state: RwLock::new(ProductState {
                remote: Vec::new(),
                products: Vec::new(),
                categories: Vec::new(),
                error: None,
                filtered_category: None,
                last_id: config.product_id_seed,
                overlay: LocalOverlay::new(),
            }),
            loading: LoadingFlag::new(),
            flash: FlashMessage::new(config.flash_ttl()),
        }
    }

    // Actions

    /// Load the whole catalog
    pub async fn fetch_products(&self) {
        let _loading = self.loading.acquire();
        self.state.write().await.error = None;

        match self.gateway.get_products().await {
            Ok(products) => {
                let mut state = self.state.write().await;
                let visible = state.overlay.replay(products.clone(), |_| true);
                state.remote = products;
                state.products = visible;
                tracing::info!("Loaded {} products", state.products.len());
            }
            Err(e) => {
                tracing::error!("{}: {}", LOAD_PRODUCTS_FAILED, e);
                self.state.write().await.error = Some(LOAD_PRODUCTS_FAILED.to_string());
            }
        }
    }

    /// Load the category names. Leaves the loading flag alone.
    pub async fn fetch_categories(&self) {
        match self.gateway.get_categories().await {
            Ok(categories) => {
                tracing::debug!("Loaded {} categories", categories.len());
                self.state.write().await.categories = categories;
            }
            Err(e) => {
                tracing::error!("{}: {}", LOAD_CATEGORIES_FAILED, e);
                self.state.write().await.error = Some(LOAD_CATEGORIES_FAILED.to_string());
            }
        }
    }

    /// Load only the products of `category` and remember the filter
    pub async fn fetch_products_by_category(&self, category: &str) {
        let _loading = self.loading.acquire();
        self.state.write().await.error = None;

        match self.gateway.get_products_by_category(category).await {
            Ok(products) => {
                let mut state = self.state.write().await;
                let visible = state
                    .overlay
                    .replay(products.clone(), |p| p.category == category);
                state.remote = products;
                state.products = visible;
                state.filtered_category = Some(category.to_string());
                tracing::info!("Loaded {} products in {:?}", state.products.len(), category);
            }
            Err(e) => {
                tracing::error!("{} for {:?}: {}", LOAD_PRODUCTS_FAILED, category, e);
                self.state.write().await.error = Some(LOAD_PRODUCTS_FAILED.to_string());
            }
        }
    }

    /// Add a product locally under a fresh synthetic id
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        self.begin_write().await;
        if let Err(reason) = draft.validate() {
            return Err(self.fail(CREATE_FAILED, StoreError::Validation(reason)).await);
        }

        let product = {
            let mut state = self.state.write().await;
            state.last_id += 1;
            let product = Product::from_draft(state.last_id, draft);
            state.products.insert(0, product.clone());
            state.overlay.record(OverlayWrite::Create(product.clone()));
            product
        };

        tracing::info!("Created product {} locally", product);
        self.flash
            .set(format!("Product \"{}\" created successfully!", product.title))
            .await;
        Ok(product)
    }

    /// Merge `patch` into the product with `id`
    pub async fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, StoreError> {
        self.begin_write().await;
        if let Err(reason) = patch.validate() {
            return Err(self.fail(UPDATE_FAILED, StoreError::Validation(reason)).await);
        }

        let updated = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            match state.products.iter_mut().find(|p| p.id == id) {
                Some(product) => {
                    product.apply(patch);
                    state.overlay.record(OverlayWrite::Update(product.clone()));
                    Some(product.clone())
                }
                None => None,
            }
        };

        let Some(product) = updated else {
            return Err(self.fail(UPDATE_FAILED, StoreError::ProductNotFound(id)).await);
        };

        tracing::info!("Updated product {} locally", product);
        self.flash
            .set(format!("Product \"{}\" updated successfully!", product.title))
            .await;
        Ok(product)
    }

    /// Remove the product with `id`, if present. Returns the removed record.
    pub async fn delete_product(&self, id: u64) -> Option<Product> {
        self.begin_write().await;

        let removed = {
            let mut state = self.state.write().await;
            let index = state.products.iter().position(|p| p.id == id);
            let removed = index.map(|index| state.products.remove(index));
            if removed.is_some() {
                state.overlay.record(OverlayWrite::Delete(id));
            }
            removed
        };

        let label = removed
            .as_ref()
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "the product".to_string());
        tracing::info!("Deleted product {} locally (present: {})", id, removed.is_some());
        self.flash.set(format!("\"{}\" was deleted successfully!", label)).await;
        removed
    }

    pub async fn clear_messages(&self) {
        self.state.write().await.error = None;
        self.flash.clear().await;
    }

    /// Drop every local write and show the last fetched collection again
    pub async fn discard_local_writes(&self) {
        let mut state = self.state.write().await;
        state.overlay.clear();
        state.products = state.remote.clone();
    }

    // Getters

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    /// Products as shown by the list view. Category filtering already
    /// happened in the fetch that populated the store.
    pub async fn filtered_products(&self) -> Vec<Product> {
        self.products().await
    }

    pub async fn find(&self, id: u64) -> Option<Product> {
        self.state.read().await.products.iter().find(|p| p.id == id).cloned()
    }

    pub async fn categories(&self) -> Vec<String> {
        self.state.read().await.categories.clone()
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

    pub async fn filtered_category(&self) -> Option<String> {
        self.state.read().await.filtered_category.clone()
    }

    pub async fn local_writes(&self) -> usize {
        self.state.read().await.overlay.len()
    }

    pub async fn snapshot(&self) -> ProductSnapshot {
        let success_message = self.flash.get().await;
        let state = self.state.read().await;
        ProductSnapshot {
            products: state.products.clone(),
            categories: state.categories.clone(),
            loading: self.loading.is_loading(),
            error: state.error.clone(),
            success_message,
            filtered_category: state.filtered_category.clone(),
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
