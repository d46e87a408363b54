//! Stock Ledger
//!
//! Conditional decrement / unconditional increment of a product's
//! `available_num`. Products with `unlimited_supply` bypass accounting.
//!
//! Both operations take a bare connection so they run either standalone
//! (autocommit, one conditional row write) or inside a caller's transaction.
//! The guard `available_num >= qty` is evaluated by the UPDATE itself, so two
//! concurrent reserves can never both succeed past the available amount.

use crate::db::repository::{RepoError, product};
use crate::utils::{AppError, ErrorCode};
use sqlx::SqliteConnection;
use thiserror::Error;

/// Outcome of a successful reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockReservation {
    /// `available_num` was decremented
    Reserved,
    /// Product has unlimited supply; nothing was touched
    Unlimited,
}

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidQuantity(qty) => AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("Quantity must be positive, got {qty}"),
            )
            .with_detail("quantity", qty),
            StockError::ProductNotFound(id) => AppError::product_not_found(id),
            StockError::InsufficientStock {
                product_id,
                requested,
                available,
            } => AppError::new(ErrorCode::InsufficientStock)
                .with_detail("product_id", product_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            StockError::Repo(e) => e.into(),
        }
    }
}

pub type StockResult<T> = Result<T, StockError>;

fn require_positive(qty: i64) -> StockResult<()> {
    if qty <= 0 {
        return Err(StockError::InvalidQuantity(qty));
    }
    Ok(())
}

/// Take `qty` units of `product_id`.
pub async fn reserve(
    conn: &mut SqliteConnection,
    product_id: i64,
    qty: i64,
) -> StockResult<StockReservation> {
    require_positive(qty)?;

    if product::try_decrement_stock(&mut *conn, product_id, qty).await? == 1 {
        tracing::debug!(product_id, qty, "Stock reserved");
        return Ok(StockReservation::Reserved);
    }

    // Guard failed: tell the three zero-row cases apart
    let Some(p) = product::find_by_id(&mut *conn, product_id).await? else {
        return Err(StockError::ProductNotFound(product_id));
    };
    if p.unlimited_supply {
        return Ok(StockReservation::Unlimited);
    }
    Err(StockError::InsufficientStock {
        product_id,
        requested: qty,
        available: p.available_num.unwrap_or(0),
    })
}

/// Give back `qty` units of `product_id`. No-op for unlimited products.
pub async fn release(conn: &mut SqliteConnection, product_id: i64, qty: i64) -> StockResult<()> {
    require_positive(qty)?;

    if product::increment_stock(&mut *conn, product_id, qty).await? == 1 {
        tracing::debug!(product_id, qty, "Stock released");
        return Ok(());
    }

    match product::find_by_id(&mut *conn, product_id).await? {
        Some(p) if p.unlimited_supply => Ok(()),
        Some(_) => Err(StockError::Repo(RepoError::Database(format!(
            "Stock increment for product {product_id} affected no rows"
        )))),
        None => Err(StockError::ProductNotFound(product_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_error_maps_to_codes() {
        let err: AppError = StockError::InsufficientStock {
            product_id: 7,
            requested: 3,
            available: 1,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        let details = err.details.unwrap();
        assert_eq!(details["available"], 1);

        let err: AppError = StockError::InvalidQuantity(0).into();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err: AppError = StockError::ProductNotFound(9).into();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
