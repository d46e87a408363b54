//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::Pagination;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ok};
use shared::models::{CheckoutRequest, Order, OrderDetail, OrderStatusUpdate};

/// GET /api/orders - the caller's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = order::find_by_user(&state.pool, user.id, page.limit(), page.offset()).await?;
    Ok(ok(orders))
}

/// POST /api/orders/checkout
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = orders::checkout(&state.pool, state.tz(), user.id, payload).await?;
    Ok(ok(detail))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = order::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    if detail.order.user_id != user.id && !user.is_admin() {
        return Err(AppError::not_owner("order_id", id));
    }
    Ok(ok(detail))
}

/// POST /api/orders/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = orders::cancel_order(&state.pool, user.id, id).await?;
    Ok(ok(order))
}

/// PUT /api/orders/{id}/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = orders::set_order_status(&state.pool, id, &payload.status).await?;
    security_log!(
        "INFO",
        "order_status_changed",
        user_id = user.id,
        order_id = id,
        status = order.status.as_str()
    );
    Ok(ok(order))
}
