//! Reservation Manager
//!
//! Reservations are a pre-paid waiting list for out-of-stock products. No
//! stock is touched when one is created or cancelled; confirming one creates
//! an order in the reservation pickup-number namespace.

use chrono::NaiveDate;
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{order, product, reservation};
use crate::orders::pickup::{AttemptError, PickupNamespace, PickupSlot, with_pickup_number};
use crate::pricing::{self, money::to_f64};
use crate::utils::validation::{MAX_RESERVATION_NOTE_LEN, normalize_notes, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode, time};
use shared::models::{
    OrderDetail, OrderOrigin, Reservation, ReservationCreate, ReservationStatus, UnknownStatus,
};

pub const MIN_QUANTITY: i64 = 1;
pub const MAX_QUANTITY: i64 = 10;

/// Earliest and latest reservation day, counted from today
pub const MIN_DAYS_AHEAD: i64 = 1;
pub const MAX_DAYS_AHEAD: i64 = 3;

/// Tomorrow up to three days out, inclusive
pub fn validate_window(today: NaiveDate, date: NaiveDate) -> AppResult<()> {
    let days = time::days_between(today, date);
    if !(MIN_DAYS_AHEAD..=MAX_DAYS_AHEAD).contains(&days) {
        return Err(AppError::with_message(
            ErrorCode::InvalidReservationWindow,
            format!(
                "Reservation date must be between {} and {}",
                today + chrono::Duration::days(MIN_DAYS_AHEAD),
                today + chrono::Duration::days(MAX_DAYS_AHEAD)
            ),
        )
        .with_detail("reservation_date", time::date_key(date)));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> AppResult<()> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}, got {quantity}"),
        )
        .with_detail("quantity", quantity));
    }
    Ok(())
}

async fn load(pool: &SqlitePool, id: i64) -> AppResult<Reservation> {
    reservation::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::reservation_not_found(id))
}

fn not_pending(r: &Reservation) -> AppError {
    AppError::new(ErrorCode::ReservationNotPending)
        .with_detail("reservation_id", r.id)
        .with_detail("status", r.status.as_str())
}

pub async fn create_reservation(
    pool: &SqlitePool,
    tz: Tz,
    user_id: i64,
    input: ReservationCreate,
) -> AppResult<Reservation> {
    create_reservation_on(pool, time::today(tz), user_id, input).await
}

/// Create against an explicit "today"
pub async fn create_reservation_on(
    pool: &SqlitePool,
    today: NaiveDate,
    user_id: i64,
    input: ReservationCreate,
) -> AppResult<Reservation> {
    validate_quantity(input.quantity)?;
    validate_window(today, input.reservation_date)?;
    validate_optional_text(&input.notes, "notes", MAX_RESERVATION_NOTE_LEN)?;

    let p = product::find_by_id(pool, input.product_id)
        .await?
        .ok_or_else(|| AppError::product_not_found(input.product_id))?;
    if !p.available {
        return Err(AppError::product_unavailable(p.id));
    }
    if !p.reservation_enabled {
        return Err(AppError::new(ErrorCode::ReservationNotEnabled).with_detail("product_id", p.id));
    }
    if !p.is_out_of_stock() {
        return Err(AppError::new(ErrorCode::ProductInStock).with_detail("product_id", p.id));
    }

    let priced = pricing::price_line(p.price, &input.variant_selections, input.quantity)?;

    // Payment capture is out of scope: reservations are stored as paid
    let created = reservation::create(
        pool,
        reservation::NewReservation {
            user_id,
            product_id: p.id,
            quantity: input.quantity,
            variant_selections: input.variant_selections,
            reservation_date: input.reservation_date,
            unit_price: to_f64(priced.unit_price),
            total_amount: to_f64(priced.line_total),
            is_paid: true,
            notes: normalize_notes(input.notes),
        },
    )
    .await?;

    tracing::info!(
        reservation_id = created.id,
        user_id,
        product_id = p.id,
        quantity = created.quantity,
        reservation_date = %created.reservation_date,
        "Reservation created"
    );
    Ok(created)
}

/// Owner withdraws a pending reservation (hard delete)
pub async fn cancel_reservation(pool: &SqlitePool, user_id: i64, id: i64) -> AppResult<()> {
    let r = load(pool, id).await?;
    if r.user_id != user_id {
        return Err(AppError::not_owner("reservation_id", id));
    }
    if r.status != ReservationStatus::Pending {
        return Err(not_pending(&r));
    }
    if reservation::delete_pending(pool, id, user_id).await? == 0 {
        // confirmed or cancelled concurrently
        return Err(not_pending(&r));
    }

    tracing::info!(reservation_id = id, user_id, "Reservation withdrawn");
    Ok(())
}

pub async fn confirm_reservation(pool: &SqlitePool, tz: Tz, id: i64) -> AppResult<OrderDetail> {
    confirm_reservation_on(pool, time::today(tz), id).await
}

/// Admin converts a paid, pending reservation into an order
pub async fn confirm_reservation_on(
    pool: &SqlitePool,
    pickup_date: NaiveDate,
    id: i64,
) -> AppResult<OrderDetail> {
    let r = load(pool, id).await?;
    if r.status != ReservationStatus::Pending {
        return Err(not_pending(&r));
    }
    if !r.is_paid {
        return Err(AppError::new(ErrorCode::ReservationNotPayable).with_detail("reservation_id", id));
    }

    let product_name = product::find_by_id(pool, r.product_id)
        .await?
        .map(|p| p.name)
        .ok_or_else(|| AppError::product_not_found(r.product_id))?;

    let r_ref = &r;
    let name_ref = &product_name;
    let detail = with_pickup_number(pool, PickupNamespace::Reservation, pickup_date, |slot| {
        place_order(pool, r_ref, name_ref, slot)
    })
    .await?;

    tracing::info!(
        reservation_id = id,
        order_id = detail.order.id,
        pickup_number = %detail.order.pickup_number,
        "Reservation confirmed"
    );
    Ok(detail)
}

/// Order + single item + reservation update, one transaction
async fn place_order(
    pool: &SqlitePool,
    r: &Reservation,
    product_name: &str,
    slot: PickupSlot,
) -> Result<OrderDetail, AttemptError> {
    let mut tx = pool.begin().await?;

    let order = order::insert(
        &mut tx,
        &order::NewOrder {
            user_id: r.user_id,
            pickup_number: slot.number,
            pickup_date: slot.date,
            total_amount: r.total_amount,
            origin: OrderOrigin::Reservation,
            notes: r.notes.clone(),
        },
    )
    .await?;

    let item = order::insert_item(
        &mut tx,
        order.id,
        &order::NewOrderItem {
            product_id: r.product_id,
            product_name: product_name.to_string(),
            quantity: r.quantity,
            price: r.unit_price,
            variant_selections: r.variant_selections.clone(),
        },
    )
    .await?;

    if reservation::mark_confirmed(&mut *tx, r.id, order.id).await? == 0 {
        return Err(not_pending(r).into());
    }

    tx.commit().await?;
    Ok(OrderDetail {
        order,
        items: vec![item],
    })
}

/// Admin status change. Only `cancelled` is accepted here; confirmation
/// has its own operation because it creates an order.
pub async fn set_reservation_status(pool: &SqlitePool, id: i64, status: &str) -> AppResult<Reservation> {
    let target: ReservationStatus = status
        .parse()
        .map_err(|e: UnknownStatus| AppError::validation(e.to_string()))?;
    if target != ReservationStatus::Cancelled {
        return Err(AppError::invalid_request(format!(
            "Reservation status can only be set to cancelled here, got {target}"
        )));
    }

    let r = load(pool, id).await?;
    if r.status != ReservationStatus::Pending {
        return Err(not_pending(&r));
    }
    let rows =
        reservation::update_status_if(pool, id, ReservationStatus::Pending, target).await?;
    if rows == 0 {
        return Err(not_pending(&r));
    }

    tracing::info!(reservation_id = id, "Reservation cancelled by admin");
    load(pool, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_accepts_one_to_three_days() {
        let today = d(2026, 12, 30);
        for date in [d(2026, 12, 31), d(2027, 1, 1), d(2027, 1, 2)] {
            assert!(validate_window(today, date).is_ok());
        }
    }

    #[test]
    fn test_window_rejects_today_past_and_far_future() {
        let today = d(2026, 3, 10);
        for date in [d(2026, 3, 10), d(2026, 3, 9), d(2026, 3, 14)] {
            let err = validate_window(today, date).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidReservationWindow);
        }
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
        for q in [0, -2, 11] {
            assert_eq!(validate_quantity(q).unwrap_err().code, ErrorCode::InvalidQuantity);
        }
    }
}
