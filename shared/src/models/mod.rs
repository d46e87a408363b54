//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake values).

pub mod cart;
pub mod order;
pub mod product;
pub mod reservation;
pub mod variant;

// Re-exports
pub use cart::*;
pub use order::*;
pub use product::*;
pub use reservation::*;
pub use variant::*;
