//! Cart Repository

use super::{RepoError, RepoResult};
use shared::models::{CartLine, CartLineCreate, CartLineWithProduct};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_CART_LINE: &str =
    "SELECT id, user_id, product_id, quantity, variant_selections, created_at FROM cart_line";

/// `?, ?, ?` for an `IN (...)` list
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CartLine>> {
    let line = sqlx::query_as::<_, CartLine>(&format!("{SELECT_CART_LINE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(line)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(&format!(
        "{SELECT_CART_LINE} WHERE user_id = ? ORDER BY created_at, id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Cart lines joined with the live product row.
///
/// `ids = None` selects the whole cart; ids that do not belong to the user
/// match no row, callers compare against what they asked for.
pub async fn find_for_checkout(
    pool: &SqlitePool,
    user_id: i64,
    ids: Option<&[i64]>,
) -> RepoResult<Vec<CartLineWithProduct>> {
    let mut sql = String::from(
        "SELECT c.id, c.user_id, c.product_id, c.quantity, c.variant_selections, p.name AS product_name, p.price AS product_price, p.available AS product_available FROM cart_line c JOIN product p ON p.id = c.product_id WHERE c.user_id = ?",
    );
    if let Some(ids) = ids {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sql.push_str(&format!(" AND c.id IN ({})", placeholders(ids.len())));
    }
    sql.push_str(" ORDER BY c.created_at, c.id");

    let mut query = sqlx::query_as::<_, CartLineWithProduct>(&sql).bind(user_id);
    for id in ids.unwrap_or_default() {
        query = query.bind(*id);
    }
    let lines = query.fetch_all(pool).await?;
    Ok(lines)
}

pub async fn create(pool: &SqlitePool, user_id: i64, data: CartLineCreate) -> RepoResult<CartLine> {
    if data.quantity <= 0 {
        return Err(RepoError::Validation(format!(
            "Quantity must be positive, got {}",
            data.quantity
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO cart_line (id, user_id, product_id, quantity, variant_selections, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(user_id)
    .bind(data.product_id)
    .bind(data.quantity)
    .bind(Json(&data.variant_selections))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create cart line".into()))
}

/// Delete one of the user's lines. Returns false when nothing matched.
pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM cart_line WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn clear(pool: &SqlitePool, user_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM cart_line WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

/// Delete consumed lines inside the checkout transaction
pub async fn delete_many(conn: &mut SqliteConnection, user_id: i64, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "DELETE FROM cart_line WHERE user_id = ? AND id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query(&sql).bind(user_id);
    for id in ids {
        query = query.bind(*id);
    }
    let rows = query.execute(conn).await?;
    Ok(rows.rows_affected())
}
