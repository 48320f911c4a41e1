//! Sales analytics derived from carts

use std::sync::Arc;
use tokio::sync::RwLock;

use super::loading::LoadingFlag;
use crate::domain::entities::Cart;
use crate::domain::traits::CatalogGateway;
use crate::infrastructure::config::StoresConfig;

const LOAD_CARTS_FAILED: &str = "Failed to load analytics data";

/// The three headline metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_sales: String,
    pub total_orders: usize,
    pub average_order_value: String,
}

struct AnalyticsState {
    carts: Vec<Cart>,
    error: Option<String>,
}

/// Holds fetched carts. Every cart counts as one order worth a flat amount;
/// cart contents are not priced.
pub struct AnalyticsStore {
    gateway: Arc<dyn CatalogGateway>,
    state: RwLock<AnalyticsState>,
    loading: LoadingFlag,
    order_value: f64,
}

impl AnalyticsStore {
    pub fn new(gateway: Arc<dyn CatalogGateway>, config: &StoresConfig) -> Self {
        Self {
            gateway,
            state: RwLock::new(AnalyticsState {
                carts: Vec::new(),
                error: None,
            }),
            loading: LoadingFlag::new(),
            order_value: config.flat_order_value,
        }
    }

    pub async fn fetch_carts(&self) {
        let _loading = self.loading.acquire();
        self.state.write().await.error = None;

        match self.gateway.get_carts().await {
            Ok(carts) => {
                tracing::info!("Loaded {} carts", carts.len());
                self.state.write().await.carts = carts;
            }
            Err(e) => {
                tracing::error!("{}: {}", LOAD_CARTS_FAILED, e);
                self.state.write().await.error = Some(LOAD_CARTS_FAILED.to_string());
            }
        }
    }

    pub async fn carts(&self) -> Vec<Cart> {
        self.state.read().await.carts.clone()
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Revenue, with two decimals
    pub async fn total_sales(&self) -> String {
        format!("{:.2}", self.sales_amount(self.total_orders().await))
    }

    pub async fn total_orders(&self) -> usize {
        self.state.read().await.carts.len()
    }

    /// Revenue per order, with two decimals; "0.00" without orders
    pub async fn average_order_value(&self) -> String {
        let orders = self.total_orders().await;
        format!("{:.2}", self.average(orders))
    }

    /// Sum of line item quantities across all carts
    pub async fn total_items(&self) -> u64 {
        self.state.read().await.carts.iter().map(Cart::item_count).sum()
    }

    /// All metrics computed from the same cart list
    pub async fn summary(&self) -> AnalyticsSummary {
        let orders = self.total_orders().await;
        AnalyticsSummary {
            total_sales: format!("{:.2}", self.sales_amount(orders)),
            total_orders: orders,
            average_order_value: format!("{:.2}", self.average(orders)),
        }
    }

    fn sales_amount(&self, orders: usize) -> f64 {
        orders as f64 * self.order_value
    }

    fn average(&self, orders: usize) -> f64 {
        if orders == 0 {
            return 0.0;
        }
        self.sales_amount(orders) / orders as f64
    }
}
