use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line item inside a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// A shopping cart, treated as one order by the analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub products: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: u64, user_id: u64) -> Self {
        Self {
            id,
            user_id,
            date: String::new(),
            products: Vec::new(),
        }
    }

    /// Order date, when the API sent an RFC 3339 timestamp
    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Sum of line item quantities
    pub fn item_count(&self) -> u64 {
        self.products.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
