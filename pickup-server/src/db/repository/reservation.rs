//! Reservation Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Reservation, ReservationStatus, VariantSelections};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT_RESERVATION: &str = "SELECT id, user_id, product_id, quantity, variant_selections, reservation_date, unit_price, total_amount, is_paid, status, notes, order_id, created_at, updated_at FROM reservation";

/// Reservation row to insert
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub variant_selections: VariantSelections,
    pub reservation_date: NaiveDate,
    pub unit_price: f64,
    pub total_amount: f64,
    pub is_paid: bool,
    pub notes: Option<String>,
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Reservation>>
where
    E: SqliteExecutor<'e>,
{
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("{SELECT_RESERVATION} WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
    Ok(reservation)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "{SELECT_RESERVATION} WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

pub async fn create(pool: &SqlitePool, data: NewReservation) -> RepoResult<Reservation> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO reservation (id, user_id, product_id, quantity, variant_selections, reservation_date, unit_price, total_amount, is_paid, status, notes, order_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, NULL, ?12, ?12)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(data.product_id)
    .bind(data.quantity)
    .bind(Json(&data.variant_selections))
    .bind(data.reservation_date)
    .bind(data.unit_price)
    .bind(data.total_amount)
    .bind(data.is_paid)
    .bind(ReservationStatus::Pending)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Hard delete while still pending. Returns affected rows.
pub async fn delete_pending(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ? AND user_id = ? AND status = ?")
        .bind(id)
        .bind(user_id)
        .bind(ReservationStatus::Pending)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

/// pending → confirmed with the back-reference. Returns affected rows.
pub async fn mark_confirmed<'e, E>(executor: E, id: i64, order_id: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, order_id = ?2, updated_at = ?3 WHERE id = ?4 AND status = ?5 AND is_paid = 1",
    )
    .bind(ReservationStatus::Confirmed)
    .bind(order_id)
    .bind(now)
    .bind(id)
    .bind(ReservationStatus::Pending)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}

/// Compare-and-set on status. Returns affected rows.
pub async fn update_status_if<'e, E>(
    executor: E,
    id: i64,
    from: ReservationStatus,
    to: ReservationStatus,
) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}
