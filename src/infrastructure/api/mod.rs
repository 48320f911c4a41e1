//! Fake Store API client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::application::errors::GatewayError;
use crate::domain::entities::{Cart, Product, User};
use crate::domain::traits::CatalogGateway;
use crate::infrastructure::config::ApiConfig;

/// HTTP implementation of [`CatalogGateway`]
pub struct FakeStoreClient {
    client: Client,
    base_url: Url,
}

impl FakeStoreClient {
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .user_agent(concat!("shop-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, escaping each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl CatalogGateway for FakeStoreClient {
    async fn get_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.get(&["products"]).await
    }

    async fn get_product(&self, id: u64) -> Result<Product, GatewayError> {
        self.get(&["products", &id.to_string()]).await
    }

    async fn get_categories(&self) -> Result<Vec<String>, GatewayError> {
        self.get(&["products", "categories"]).await
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, GatewayError> {
        self.get(&["products", "category", category]).await
    }

    async fn get_users(&self) -> Result<Vec<User>, GatewayError> {
        self.get(&["users"]).await
    }

    async fn get_user(&self, id: u64) -> Result<User, GatewayError> {
        self.get(&["users", &id.to_string()]).await
    }

    async fn get_carts(&self) -> Result<Vec<Cart>, GatewayError> {
        self.get(&["carts"]).await
    }
}
