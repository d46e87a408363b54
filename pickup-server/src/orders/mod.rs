//! Order core
//!
//! - **pickup**: daily pickup-number allocation with collision retry
//! - **checkout**: cart → order with stock reservation and compensation
//! - **lifecycle**: status transitions and stock-restoring cancellation

pub mod checkout;
pub mod lifecycle;
pub mod pickup;

pub use checkout::{checkout, checkout_on};
pub use lifecycle::{Actor, can_transition, cancel_order, set_order_status};
pub use pickup::{MAX_PICKUP_ATTEMPTS, PickupNamespace};
