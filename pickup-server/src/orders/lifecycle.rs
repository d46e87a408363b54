//! Order Lifecycle Controller
//!
//! Status changes go through an explicit transition table. Entering
//! `cancelled` restores stock for every item of the order, whatever its
//! origin, in the same transaction as the status write: either both happen or
//! neither does.

use sqlx::SqlitePool;

use crate::db::repository::{RepoError, order};
use crate::inventory;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus};

/// Who is asking for the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin,
    Customer,
}

use OrderStatus::*;

/// Admin: forward moves (skipping allowed) and cancel from any open state
const ADMIN_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[
    (Pending, Preparing),
    (Pending, Ready),
    (Pending, Completed),
    (Preparing, Ready),
    (Preparing, Completed),
    (Ready, Completed),
    (Pending, Cancelled),
    (Preparing, Cancelled),
    (Ready, Cancelled),
];

/// Customer: self-service cancel while nothing has been prepared
const CUSTOMER_TRANSITIONS: &[(OrderStatus, OrderStatus)] = &[(Pending, Cancelled)];

pub fn can_transition(actor: Actor, from: OrderStatus, to: OrderStatus) -> bool {
    let table = match actor {
        Actor::Admin => ADMIN_TRANSITIONS,
        Actor::Customer => CUSTOMER_TRANSITIONS,
    };
    table.contains(&(from, to))
}

async fn load(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))
}

fn transition_error(code: ErrorCode, order: &Order, to: OrderStatus) -> AppError {
    AppError::with_message(
        code,
        format!("Cannot move order from {} to {}", order.status, to),
    )
    .with_detail("order_id", order.id)
    .with_detail("from", order.status.as_str())
    .with_detail("to", to.as_str())
}

/// Admin status change; `status` is the raw requested value
pub async fn set_order_status(pool: &SqlitePool, order_id: i64, status: &str) -> AppResult<Order> {
    let target: OrderStatus = status
        .parse()
        .map_err(|e: shared::models::UnknownStatus| AppError::validation(e.to_string()))?;

    let current = load(pool, order_id).await?;
    if !can_transition(Actor::Admin, current.status, target) {
        return Err(transition_error(ErrorCode::OrderInvalidTransition, &current, target));
    }

    if target == Cancelled {
        cancel_with_restock(pool, &current, ErrorCode::OrderInvalidTransition).await?;
    } else {
        let rows = order::update_status_if(pool, order_id, current.status, target).await?;
        if rows == 0 {
            return Err(transition_error(ErrorCode::OrderInvalidTransition, &current, target));
        }
    }

    tracing::info!(
        order_id,
        from = %current.status,
        to = %target,
        "Order status changed by admin"
    );
    load(pool, order_id).await
}

/// Customer self-service cancel
pub async fn cancel_order(pool: &SqlitePool, user_id: i64, order_id: i64) -> AppResult<Order> {
    let current = load(pool, order_id).await?;
    if current.user_id != user_id {
        return Err(AppError::not_owner("order_id", order_id));
    }
    if !can_transition(Actor::Customer, current.status, Cancelled) {
        return Err(transition_error(ErrorCode::OrderNotCancelable, &current, Cancelled));
    }

    cancel_with_restock(pool, &current, ErrorCode::OrderNotCancelable).await?;
    tracing::info!(order_id, user_id, "Order cancelled by customer");
    load(pool, order_id).await
}

/// Status write plus stock restoration, one transaction.
///
/// The status guard is re-checked by the UPDATE, so a concurrent change
/// fails with `guard_code` and nothing is restored twice.
async fn cancel_with_restock(
    pool: &SqlitePool,
    current: &Order,
    guard_code: ErrorCode,
) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let rows = order::update_status_if(&mut *tx, current.id, current.status, Cancelled).await?;
    if rows == 0 {
        return Err(transition_error(guard_code, current, Cancelled));
    }

    let items = order::find_items(&mut *tx, current.id).await?;
    for item in &items {
        inventory::release(&mut tx, item.product_id, item.quantity).await?;
    }
    tracing::debug!(
        order_id = current.id,
        origin = current.origin.as_str(),
        items = items.len(),
        "Stock restored"
    );

    tx.commit().await.map_err(RepoError::from)?;
    Ok(())
}
