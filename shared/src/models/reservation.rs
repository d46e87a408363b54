//! Reservation Model
//!
//! A reservation holds demand for an out-of-stock product on a future
//! business day. Confirming it produces an order.

use super::{UnknownStatus, VariantSelections};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub variant_selections: VariantSelections,
    pub reservation_date: NaiveDate,
    /// Adjusted unit price at creation time
    pub unit_price: f64,
    pub total_amount: f64,
    pub is_paid: bool,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    /// Set once confirmed
    pub order_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub variant_selections: VariantSelections,
    pub reservation_date: NaiveDate,
    pub notes: Option<String>,
}

/// Status change payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: String,
}
