//! Checkout Orchestrator
//!
//! Turns a user's cart lines into an order:
//!
//! 1. load the selected lines joined with live product data and validate
//! 2. price every line (before any write)
//! 3. reserve stock line by line; the first failure releases what was
//!    already reserved, in reverse order
//! 4. allocate a pickup number and, in one transaction, insert the order and
//!    its items and delete the consumed cart lines; retried on collision
//! 5. any failure after step 3 releases every reserved line
//!
//! Step 3 is a saga of independent conditional writes, not one transaction.
//! A failed compensating release is logged and not retried.

use chrono::NaiveDate;
use chrono_tz::Tz;
use sqlx::{SqliteConnection, SqlitePool};

use super::pickup::{AttemptError, PickupNamespace, PickupSlot, with_pickup_number};
use crate::db::repository::{RepoError, cart, order};
use crate::inventory::{self, StockError, StockReservation};
use crate::pricing::{self, PricedLine, money::to_f64};
use crate::utils::validation::{MAX_NOTE_LEN, normalize_notes, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode, time};
use shared::models::{CartLineWithProduct, CheckoutRequest, OrderDetail, OrderOrigin};

/// Units taken from the ledger during this checkout
#[derive(Debug, Clone, Copy)]
struct ReservedLine {
    product_id: i64,
    quantity: i64,
}

/// Checkout for today's business date
pub async fn checkout(
    pool: &SqlitePool,
    tz: Tz,
    user_id: i64,
    req: CheckoutRequest,
) -> AppResult<OrderDetail> {
    checkout_on(pool, time::today(tz), user_id, req).await
}

/// Checkout with an explicit business date for the pickup number
pub async fn checkout_on(
    pool: &SqlitePool,
    pickup_date: NaiveDate,
    user_id: i64,
    req: CheckoutRequest,
) -> AppResult<OrderDetail> {
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    let notes = normalize_notes(req.notes);

    // 1. load + validate
    let lines = load_lines(pool, user_id, req.cart_line_ids.as_deref()).await?;

    // 2. price
    let priced = lines
        .iter()
        .map(|l| pricing::price_line(l.product_price, &l.variant_selections, l.quantity))
        .collect::<AppResult<Vec<PricedLine>>>()?;
    let total = pricing::order_total(&priced);

    // 3. reserve
    let reserved = reserve_lines(pool, &lines).await?;

    // 4. persist
    let lines_ref = &lines;
    let priced_ref = &priced;
    let notes_ref = &notes;
    let result = with_pickup_number(pool, PickupNamespace::Checkout, pickup_date, |slot| {
        place_order(pool, user_id, lines_ref, priced_ref, to_f64(total), notes_ref, slot)
    })
    .await;

    match result {
        Ok(detail) => {
            tracing::info!(
                order_id = detail.order.id,
                user_id,
                pickup_number = %detail.order.pickup_number,
                total = detail.order.total_amount,
                items = detail.items.len(),
                "Order placed"
            );
            Ok(detail)
        }
        Err(e) => {
            // 5. compensate
            tracing::warn!(user_id, error = %e, "Checkout failed after reserving stock, releasing");
            match pool.acquire().await {
                Ok(mut conn) => compensate(&mut conn, &reserved).await,
                Err(acquire_err) => tracing::error!(
                    user_id,
                    error = %acquire_err,
                    reserved = ?reserved,
                    "Stock compensation skipped: no connection"
                ),
            }
            Err(e)
        }
    }
}

async fn load_lines(
    pool: &SqlitePool,
    user_id: i64,
    ids: Option<&[i64]>,
) -> AppResult<Vec<CartLineWithProduct>> {
    let lines = cart::find_for_checkout(pool, user_id, ids).await?;
    if let Some(ids) = ids {
        // Unknown ids and other users' lines are not silently skipped
        let missing: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| !lines.iter().any(|l| l.id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::new(ErrorCode::CartLineNotFound)
                .with_detail("cart_line_ids", missing));
        }
    }
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    for line in &lines {
        if !line.product_available {
            return Err(AppError::with_message(
                ErrorCode::ProductUnavailable,
                format!("{} is no longer available", line.product_name),
            )
            .with_detail("product_id", line.product_id)
            .with_detail("product_name", line.product_name.clone()));
        }
        pricing::validate_quantity(line.quantity)?;
    }
    Ok(lines)
}

/// Reserve every line in order; on failure undo the ones already reserved.
async fn reserve_lines(
    pool: &SqlitePool,
    lines: &[CartLineWithProduct],
) -> AppResult<Vec<ReservedLine>> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    let mut reserved = Vec::with_capacity(lines.len());

    for line in lines {
        match inventory::reserve(&mut conn, line.product_id, line.quantity).await {
            Ok(StockReservation::Reserved) => reserved.push(ReservedLine {
                product_id: line.product_id,
                quantity: line.quantity,
            }),
            Ok(StockReservation::Unlimited) => {}
            Err(e) => {
                compensate(&mut conn, &reserved).await;
                return Err(name_product(e, line));
            }
        }
    }
    Ok(reserved)
}

fn name_product(err: StockError, line: &CartLineWithProduct) -> AppError {
    let insufficient = matches!(err, StockError::InsufficientStock { .. });
    let mut app_err = AppError::from(err).with_detail("product_name", line.product_name.clone());
    if insufficient {
        app_err.message = format!("Insufficient stock for {}", line.product_name);
    }
    app_err
}

/// Release reserved lines in reverse order. Failures are logged, not retried.
async fn compensate(conn: &mut SqliteConnection, reserved: &[ReservedLine]) {
    for line in reserved.iter().rev() {
        if let Err(e) = inventory::release(conn, line.product_id, line.quantity).await {
            tracing::error!(
                product_id = line.product_id,
                quantity = line.quantity,
                error = %e,
                "Stock compensation failed, inventory is now short"
            );
        }
    }
}

/// One all-or-nothing placement attempt
async fn place_order(
    pool: &SqlitePool,
    user_id: i64,
    lines: &[CartLineWithProduct],
    priced: &[PricedLine],
    total_amount: f64,
    notes: &Option<String>,
    slot: PickupSlot,
) -> Result<OrderDetail, AttemptError> {
    let mut tx = pool.begin().await?;

    let order = order::insert(
        &mut tx,
        &order::NewOrder {
            user_id,
            pickup_number: slot.number,
            pickup_date: slot.date,
            total_amount,
            origin: OrderOrigin::Checkout,
            notes: notes.clone(),
        },
    )
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (line, price) in lines.iter().zip(priced) {
        let item = order::insert_item(
            &mut tx,
            order.id,
            &order::NewOrderItem {
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                price: to_f64(price.unit_price),
                variant_selections: line.variant_selections.clone(),
            },
        )
        .await?;
        items.push(item);
    }

    // Lines consumed by a concurrent checkout must not be sold twice
    let ids: Vec<i64> = lines.iter().map(|l| l.id).collect();
    let deleted = cart::delete_many(&mut tx, user_id, &ids).await?;
    if deleted != ids.len() as u64 {
        return Err(AppError::with_message(
            ErrorCode::CartLineNotFound,
            "Cart changed during checkout, please retry",
        )
        .into());
    }

    tx.commit().await?;
    Ok(OrderDetail { order, items })
}
