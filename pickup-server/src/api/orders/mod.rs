//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | GET | customer |
//! | /api/orders/checkout | POST | customer |
//! | /api/orders/{id} | GET | owner or admin |
//! | /api/orders/{id}/cancel | POST | owner |
//! | /api/orders/{id}/status | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let customer = Router::new()
        .route("/", get(handler::list))
        .route("/checkout", post(handler::checkout))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", post(handler::cancel));

    let admin = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .route_layer(middleware::from_fn(require_admin));

    customer.merge(admin)
}
