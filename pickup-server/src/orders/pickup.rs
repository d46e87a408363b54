//! Pickup-number allocator
//!
//! Numbers are derived from a live `MAX()` over the business day's orders
//! and are only candidates: `UNIQUE(pickup_date, pickup_number)` decides.
//! A collision rolls the whole attempt back and a fresh candidate is tried,
//! up to [`MAX_PICKUP_ATTEMPTS`] times.

use std::future::Future;

use chrono::NaiveDate;
use sqlx::SqliteExecutor;
use thiserror::Error;

use crate::db::repository::{RepoError, RepoResult, order};
use crate::utils::{AppError, AppResult, ErrorCode, time};

pub const MAX_PICKUP_ATTEMPTS: usize = 10;

/// Numbering scheme of the two order sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupNamespace {
    /// Regular checkout: 3 digits, max over every number of the day
    Checkout,
    /// Confirmed reservation: 4 digits, max over 4-character numbers only
    Reservation,
}

impl PickupNamespace {
    pub fn width(&self) -> usize {
        match self {
            PickupNamespace::Checkout => 3,
            PickupNamespace::Reservation => 4,
        }
    }

    fn length_filter(&self) -> Option<usize> {
        match self {
            PickupNamespace::Checkout => None,
            PickupNamespace::Reservation => Some(4),
        }
    }
}

/// A candidate number together with the business day it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupSlot {
    pub date: String,
    pub number: String,
}

/// Zero-padded to `width`; wider values are kept as is
pub fn format_pickup_number(value: i64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Next candidate for `pickup_date` (`YYYY-MM-DD`)
pub async fn next_pickup_number<'e, E>(
    executor: E,
    namespace: PickupNamespace,
    pickup_date: &str,
) -> RepoResult<String>
where
    E: SqliteExecutor<'e>,
{
    let max = order::max_pickup_number(executor, pickup_date, namespace.length_filter()).await?;
    Ok(format_pickup_number(max.unwrap_or(0) + 1, namespace.width()))
}

/// Failure of one placement attempt
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("Pickup number collision: {0}")]
    Collision(String),

    #[error(transparent)]
    Failed(#[from] AppError),
}

impl From<RepoError> for AttemptError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => AttemptError::Collision(msg),
            other => AttemptError::Failed(other.into()),
        }
    }
}

impl From<sqlx::Error> for AttemptError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from(err).into()
    }
}

/// Run `attempt` with fresh candidates until it stops colliding.
///
/// `attempt` must be all-or-nothing (one transaction) so a collision leaves
/// nothing behind.
pub async fn with_pickup_number<T, F, Fut>(
    pool: &sqlx::SqlitePool,
    namespace: PickupNamespace,
    date: NaiveDate,
    mut attempt: F,
) -> AppResult<T>
where
    F: FnMut(PickupSlot) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let date_key = time::date_key(date);

    for n in 1..=MAX_PICKUP_ATTEMPTS {
        let number = next_pickup_number(pool, namespace, &date_key).await?;
        let slot = PickupSlot {
            date: date_key.clone(),
            number: number.clone(),
        };
        match attempt(slot).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Collision(msg)) => {
                tracing::warn!(
                    attempt = n,
                    pickup_number = %number,
                    pickup_date = %date_key,
                    reason = %msg,
                    "Pickup number collision, retrying"
                );
            }
            Err(AttemptError::Failed(e)) => return Err(e),
        }
    }

    tracing::error!(
        pickup_date = %date_key,
        namespace = ?namespace,
        attempts = MAX_PICKUP_ATTEMPTS,
        "Pickup number allocation exhausted"
    );
    Err(AppError::new(ErrorCode::SequenceExhausted).with_detail("attempts", MAX_PICKUP_ATTEMPTS))
}
