use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::{Cart, Product, User};

/// CatalogGateway trait - read-only access to the remote store API
///
/// Every call is a single request with no retry and no caching. Failures
/// are reported as-is; interpreting them is up to the caller.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn get_products(&self) -> Result<Vec<Product>, GatewayError>;
    async fn get_product(&self, id: u64) -> Result<Product, GatewayError>;
    async fn get_categories(&self) -> Result<Vec<String>, GatewayError>;
    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, GatewayError>;

    async fn get_users(&self) -> Result<Vec<User>, GatewayError>;
    async fn get_user(&self, id: u64) -> Result<User, GatewayError>;

    async fn get_carts(&self) -> Result<Vec<Cart>, GatewayError>;
}
