//! Product Model
//!
//! Products are owned by the catalog; the order core only reads them and
//! adjusts `available_num` through the stock ledger.

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Exempt from stock accounting entirely
    pub unlimited_supply: bool,
    /// Remaining units; ignored when `unlimited_supply` is set
    pub available_num: Option<i64>,
    /// Listed for sale
    pub available: bool,
    /// Accepts reservations while out of stock
    pub reservation_enabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// No unit can currently be reserved
    pub fn is_out_of_stock(&self) -> bool {
        !self.unlimited_supply && self.available_num.unwrap_or(0) <= 0
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub unlimited_supply: bool,
    pub available_num: Option<i64>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub reservation_enabled: bool,
}

fn default_true() -> bool {
    true
}
