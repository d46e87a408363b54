//! API routes
//!
//! - [`health`] - liveness and database check (public)
//! - [`cart`] - the caller's cart
//! - [`orders`] - checkout, order history, cancellation, admin status changes
//! - [`reservations`] - reservations for out-of-stock products

pub mod cart;
pub mod health;
pub mod orders;
pub mod reservations;

use axum::Router;
use serde::Deserialize;

use crate::core::ServerState;

/// Every route of the service, without state or global layers
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(reservations::router())
}

/// `?limit=&offset=` for list endpoints
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 200;

    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }
}
