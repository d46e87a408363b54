//! Cart Model

use super::VariantSelections;
use serde::{Deserialize, Serialize};

/// Cart line owned by a user; consumed by checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub variant_selections: VariantSelections,
    pub created_at: i64,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineCreate {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub variant_selections: VariantSelections,
}

/// Cart line joined with the live product row (checkout input)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLineWithProduct {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub variant_selections: VariantSelections,
    pub product_name: String,
    pub product_price: f64,
    pub product_available: bool,
}
