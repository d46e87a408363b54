//! Order Repository
//!
//! Orders are never deleted. Inserts run inside the caller's transaction;
//! a pickup-number collision surfaces as [`RepoError::Duplicate`].

use super::RepoResult;
use shared::models::{
    Order, OrderDetail, OrderItem, OrderOrigin, OrderStatus, VariantSelections,
};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT_ORDER: &str = "SELECT id, user_id, pickup_number, pickup_date, total_amount, status, origin, notes, created_at, updated_at FROM orders";

const SELECT_ITEM: &str = "SELECT id, order_id, product_id, product_name, quantity, price, variant_selections FROM order_item";

/// Order row to insert
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub pickup_number: String,
    pub pickup_date: String,
    pub total_amount: f64,
    pub origin: OrderOrigin,
    pub notes: Option<String>,
}

/// Order item row to insert
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub variant_selections: VariantSelections,
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Order>>
where
    E: SqliteExecutor<'e>,
{
    let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

pub async fn find_items<'e, E>(executor: E, order_id: i64) -> RepoResult<Vec<OrderItem>>
where
    E: SqliteExecutor<'e>,
{
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "{SELECT_ITEM} WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(items)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = find_items(pool, id).await?;
    Ok(Some(OrderDetail { order, items }))
}

pub async fn find_by_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{SELECT_ORDER} WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_pickup_date(pool: &SqlitePool, pickup_date: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{SELECT_ORDER} WHERE pickup_date = ? ORDER BY created_at, id"
    ))
    .bind(pickup_date)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Highest numeric pickup number issued on `pickup_date`.
///
/// `width` restricts the scan to numbers of exactly that many characters.
pub async fn max_pickup_number<'e, E>(
    executor: E,
    pickup_date: &str,
    width: Option<usize>,
) -> RepoResult<Option<i64>>
where
    E: SqliteExecutor<'e>,
{
    let max = match width {
        Some(w) => {
            sqlx::query_scalar::<_, Option<i64>>(
                "SELECT MAX(CAST(pickup_number AS INTEGER)) FROM orders WHERE pickup_date = ? AND LENGTH(pickup_number) = ?",
            )
            .bind(pickup_date)
            .bind(w as i64)
            .fetch_one(executor)
            .await?
        }
        None => {
            sqlx::query_scalar::<_, Option<i64>>(
                "SELECT MAX(CAST(pickup_number AS INTEGER)) FROM orders WHERE pickup_date = ?",
            )
            .bind(pickup_date)
            .fetch_one(executor)
            .await?
        }
    };
    Ok(max)
}

/// Insert the order header with status `pending`
pub async fn insert(conn: &mut SqliteConnection, data: &NewOrder) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO orders (id, user_id, pickup_number, pickup_date, total_amount, status, origin, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(&data.pickup_number)
    .bind(&data.pickup_date)
    .bind(data.total_amount)
    .bind(OrderStatus::Pending)
    .bind(data.origin)
    .bind(&data.notes)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(Order {
        id,
        user_id: data.user_id,
        pickup_number: data.pickup_number.clone(),
        pickup_date: data.pickup_date.clone(),
        total_amount: data.total_amount,
        status: OrderStatus::Pending,
        origin: data.origin,
        notes: data.notes.clone(),
        created_at: now,
        updated_at: now,
    })
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    data: &NewOrderItem,
) -> RepoResult<OrderItem> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, product_id, product_name, quantity, price, variant_selections) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(order_id)
    .bind(data.product_id)
    .bind(&data.product_name)
    .bind(data.quantity)
    .bind(data.price)
    .bind(Json(&data.variant_selections))
    .execute(&mut *conn)
    .await?;

    Ok(OrderItem {
        id,
        order_id,
        product_id: data.product_id,
        product_name: data.product_name.clone(),
        quantity: data.quantity,
        price: data.price,
        variant_selections: data.variant_selections.clone(),
    })
}

/// Compare-and-set on status. Returns affected rows (0 = guard failed).
pub async fn update_status_if<'e, E>(
    executor: E,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4")
        .bind(to)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected())
}
