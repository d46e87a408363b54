//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::reservation;
use crate::reservations;
use crate::security_log;
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message};
use shared::models::{OrderDetail, Reservation, ReservationCreate, ReservationStatusUpdate};

/// GET /api/reservations
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let items = reservation::find_by_user(&state.pool, user.id).await?;
    Ok(ok(items))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let created = reservations::create_reservation(&state.pool, state.tz(), user.id, payload).await?;
    Ok(ok(created))
}

/// DELETE /api/reservations/{id} - only while pending
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    reservations::cancel_reservation(&state.pool, user.id, id).await?;
    Ok(ok_with_message(true, "Reservation cancelled"))
}

/// POST /api/reservations/{id}/confirm (admin)
pub async fn confirm(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = reservations::confirm_reservation(&state.pool, state.tz(), id).await?;
    security_log!(
        "INFO",
        "reservation_confirmed",
        user_id = user.id,
        reservation_id = id,
        order_id = detail.order.id
    );
    Ok(ok(detail))
}

/// PUT /api/reservations/{id}/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let updated = reservations::set_reservation_status(&state.pool, id, &payload.status).await?;
    Ok(ok(updated))
}
