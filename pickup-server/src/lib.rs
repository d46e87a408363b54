//! Pickup Server - order transaction core for a pickup-only storefront
//!
//! # Modules
//!
//! - **Stock ledger** (`inventory`): conditional decrement / restore of `available_num`
//! - **Pricing** (`pricing`): variant-adjusted unit prices, decimal totals
//! - **Orders** (`orders`): checkout saga, pickup numbers, status lifecycle
//! - **Reservations** (`reservations`): demand capture for sold-out products
//! - **HTTP API** (`api`): REST routes behind JWT auth
//!
//! ```text
//! pickup-server/src/
//! ├── core/          # config, state, errors, HTTP server
//! ├── auth/          # JWT, extractor, middleware
//! ├── api/           # routes and handlers
//! ├── db/            # SQLite pool + repositories
//! ├── inventory/     # stock ledger
//! ├── pricing/       # money + unit prices
//! ├── orders/        # checkout, pickup numbers, lifecycle
//! ├── reservations/  # reservation manager
//! └── utils/         # errors, logger, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod pricing;
pub mod reservations;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro, routed to the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
