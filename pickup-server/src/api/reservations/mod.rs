//! Reservation API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/reservations | GET, POST | customer |
//! | /api/reservations/{id} | DELETE | owner |
//! | /api/reservations/{id}/confirm | POST | admin |
//! | /api/reservations/{id}/status | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    let customer = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::cancel));

    let admin = Router::new()
        .route("/{id}/confirm", post(handler::confirm))
        .route("/{id}/status", put(handler::update_status))
        .route_layer(middleware::from_fn(require_admin));

    customer.merge(admin)
}
