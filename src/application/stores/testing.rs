//! In-memory gateway for store tests

use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::GatewayError;
use crate::domain::entities::{Cart, Product, Rating, User, UserDraft};
use crate::domain::traits::CatalogGateway;

/// Serves fixed collections, or fails every call
#[derive(Default)]
pub(crate) struct StubGateway {
    products: Vec<Product>,
    categories: Vec<String>,
    users: Vec<User>,
    carts: Vec<Cart>,
    fail: bool,
    delay: Option<Duration>,
}

impl StubGateway {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub(crate) fn with_carts(carts: Vec<Cart>) -> Self {
        Self {
            carts,
            ..Self::default()
        }
    }

    pub(crate) fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            price: 10.0,
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate: 4.0, count: 10 },
        }
    }

    pub(crate) fn user(id: u64, username: &str) -> User {
        User::from_draft(id, UserDraft::new(username, format!("{}@example.com", username)))
    }

    async fn respond<T>(&self, value: T) -> Result<T, GatewayError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(value)
    }
}

#[async_trait]
impl CatalogGateway for StubGateway {
    async fn get_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.respond(self.products.clone()).await
    }

    async fn get_product(&self, id: u64) -> Result<Product, GatewayError> {
        let found = self.products.iter().find(|p| p.id == id).cloned();
        self.respond(found).await?.ok_or(GatewayError::Status {
            status: 404,
            url: format!("/products/{}", id),
        })
    }

    async fn get_categories(&self) -> Result<Vec<String>, GatewayError> {
        self.respond(self.categories.clone()).await
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, GatewayError> {
        let products = self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        self.respond(products).await
    }

    async fn get_users(&self) -> Result<Vec<User>, GatewayError> {
        self.respond(self.users.clone()).await
    }

    async fn get_user(&self, id: u64) -> Result<User, GatewayError> {
        let found = self.users.iter().find(|u| u.id == id).cloned();
        self.respond(found).await?.ok_or(GatewayError::Status {
            status: 404,
            url: format!("/users/{}", id),
        })
    }

    async fn get_carts(&self) -> Result<Vec<Cart>, GatewayError> {
        self.respond(self.carts.clone()).await
    }
}
