//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{cart, product};
use crate::pricing;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};
use shared::models::{CartLine, CartLineCreate};

/// GET /api/cart
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<CartLine>>>> {
    let lines = cart::find_by_user(&state.pool, user.id).await?;
    Ok(ok(lines))
}

/// POST /api/cart
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartLineCreate>,
) -> AppResult<Json<ApiResponse<CartLine>>> {
    pricing::validate_quantity(payload.quantity)?;
    let p = product::find_by_id(&state.pool, payload.product_id)
        .await?
        .ok_or_else(|| AppError::product_not_found(payload.product_id))?;
    if !p.available {
        return Err(AppError::product_unavailable(p.id));
    }
    // Modifiers are trusted catalog values; only reject selections that could
    // never be priced
    pricing::unit_price(p.price, &payload.variant_selections)?;

    let line = cart::create(&state.pool, user.id, payload).await?;
    Ok(ok(line))
}

/// DELETE /api/cart/{id}
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !cart::delete(&state.pool, user.id, id).await? {
        return Err(AppError::new(ErrorCode::CartLineNotFound).with_detail("cart_line_id", id));
    }
    Ok(ok(true))
}

/// DELETE /api/cart
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<u64>>> {
    let removed = cart::clear(&state.pool, user.id).await?;
    Ok(ok(removed))
}
