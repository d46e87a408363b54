//! Product Repository
//!
//! The catalog itself is managed elsewhere; this module reads products and
//! carries the two stock statements the ledger is built on.

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT_PRODUCT: &str = "SELECT id, name, price, unlimited_supply, available_num, available, reservation_enabled, created_at, updated_at FROM product";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

/// Insert a catalog row (seeding and tests)
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if !data.price.is_finite() || data.price < 0.0 {
        return Err(RepoError::Validation(format!(
            "Price must be a non-negative number, got {}",
            data.price
        )));
    }
    if matches!(data.available_num, Some(n) if n < 0) {
        return Err(RepoError::Validation(
            "available_num cannot be negative".into(),
        ));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, price, unlimited_supply, available_num, available, reservation_enabled, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.unlimited_supply)
    .bind(data.available_num)
    .bind(data.available)
    .bind(data.reservation_enabled)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Conditional decrement; the guard is evaluated by the write itself.
///
/// Returns affected rows: 0 when the product is missing, unlimited or short.
pub async fn try_decrement_stock<'e, E>(executor: E, id: i64, qty: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET available_num = available_num - ?1, updated_at = ?3 WHERE id = ?2 AND unlimited_supply = 0 AND available_num >= ?1",
    )
    .bind(qty)
    .bind(id)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}

/// Unconditional increment for limited products. Returns affected rows.
pub async fn increment_stock<'e, E>(executor: E, id: i64, qty: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET available_num = COALESCE(available_num, 0) + ?1, updated_at = ?3 WHERE id = ?2 AND unlimited_supply = 0",
    )
    .bind(qty)
    .bind(id)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}

/// Overwrite the stock level (restock)
pub async fn set_available_num(pool: &SqlitePool, id: i64, available_num: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE product SET available_num = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(available_num)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}
