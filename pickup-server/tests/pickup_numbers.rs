//! Per-day pickup numbering

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::*;
use pickup_server::db::repository::order;
use pickup_server::orders::pickup::{AttemptError, with_pickup_number};
use pickup_server::orders::{MAX_PICKUP_ATTEMPTS, PickupNamespace, cancel_order, checkout_on};
use pickup_server::reservations::{confirm_reservation_on, create_reservation_on};
use pickup_server::utils::ErrorCode;
use shared::models::{CheckoutRequest, OrderOrigin, ReservationCreate, VariantSelections};
use sqlx::SqlitePool;

async fn buy_one(pool: &SqlitePool, user_id: i64, product_id: i64, on: chrono::NaiveDate) -> String {
    add_line(pool, user_id, product_id, 1).await;
    checkout_on(pool, on, user_id, CheckoutRequest::default())
        .await
        .unwrap()
        .order
        .pickup_number
}

#[tokio::test]
async fn test_numbers_increase_within_a_day() {
    let db = setup().await;
    let p = unlimited(&db.pool, "Tea", 2.0).await;
    let today = day(2026, 5, 4);

    assert_eq!(buy_one(&db.pool, ALICE, p.id, today).await, "001");
    assert_eq!(buy_one(&db.pool, BOB, p.id, today).await, "002");
    assert_eq!(buy_one(&db.pool, ALICE, p.id, today).await, "003");
}

#[tokio::test]
async fn test_numbering_restarts_each_business_day() {
    let db = setup().await;
    let p = unlimited(&db.pool, "Tea", 2.0).await;

    assert_eq!(buy_one(&db.pool, ALICE, p.id, day(2026, 5, 4)).await, "001");
    assert_eq!(buy_one(&db.pool, ALICE, p.id, day(2026, 5, 4)).await, "002");
    assert_eq!(buy_one(&db.pool, ALICE, p.id, day(2026, 5, 5)).await, "001");
    assert_eq!(
        order::find_by_pickup_date(&db.pool, "2026-05-04").await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_cancelled_orders_keep_their_number() {
    let db = setup().await;
    let p = stocked(&db.pool, "Quiche", 7.0, 10).await;
    let today = day(2026, 5, 4);

    add_line(&db.pool, ALICE, p.id, 1).await;
    let first = checkout_on(&db.pool, today, ALICE, CheckoutRequest::default())
        .await
        .unwrap();
    assert_eq!(first.order.pickup_number, "001");
    cancel_order(&db.pool, ALICE, first.order.id).await.unwrap();

    assert_eq!(buy_one(&db.pool, ALICE, p.id, today).await, "002");
}

#[tokio::test]
async fn test_confirmed_reservations_use_four_digits() {
    let db = setup().await;
    let tea = unlimited(&db.pool, "Tea", 2.0).await;
    let cake = reservable(&db.pool, "Whole cake", 30.0).await;
    let today = day(2026, 5, 4);
    let pickup_day = day(2026, 5, 5);

    let mut reservation_ids = Vec::new();
    for user in [ALICE, BOB] {
        let r = create_reservation_on(
            &db.pool,
            today,
            user,
            ReservationCreate {
                product_id: cake.id,
                quantity: 1,
                variant_selections: VariantSelections::new(),
                reservation_date: pickup_day,
                notes: None,
            },
        )
        .await
        .unwrap();
        reservation_ids.push(r.id);
    }

    assert_eq!(buy_one(&db.pool, ALICE, tea.id, pickup_day).await, "001");

    let confirmed = confirm_reservation_on(&db.pool, pickup_day, reservation_ids[0])
        .await
        .unwrap();
    assert_eq!(confirmed.order.pickup_number, "0001");
    assert_eq!(confirmed.order.origin, OrderOrigin::Reservation);

    // Checkout numbering continues past every number of the day
    assert_eq!(buy_one(&db.pool, BOB, tea.id, pickup_day).await, "002");

    // Reservation numbering only looks at four-digit numbers
    let confirmed = confirm_reservation_on(&db.pool, pickup_day, reservation_ids[1])
        .await
        .unwrap();
    assert_eq!(confirmed.order.pickup_number, "0002");
}

#[tokio::test]
async fn test_collision_is_retried_with_fresh_number() {
    let db = setup().await;
    let date = day(2026, 5, 4);
    let calls = Arc::new(AtomicUsize::new(0));

    let pool = db.pool.clone();
    let counter = calls.clone();
    let number = with_pickup_number(&db.pool, PickupNamespace::Checkout, date, move |slot| {
        let pool = pool.clone();
        let counter = counter.clone();
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let mut conn = pool.acquire().await?;
            let new_order = |user_id| order::NewOrder {
                user_id,
                pickup_number: slot.number.clone(),
                pickup_date: slot.date.clone(),
                total_amount: 1.0,
                origin: OrderOrigin::Checkout,
                notes: None,
            };
            if n == 0 {
                // A concurrent writer takes the number first
                order::insert(&mut conn, &new_order(BOB)).await?;
            }
            let placed = order::insert(&mut conn, &new_order(ALICE)).await?;
            Ok::<_, AttemptError>(placed.pickup_number)
        }
    })
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(number, "002");
}

#[tokio::test]
async fn test_allocation_gives_up_after_max_attempts() {
    let db = setup().await;
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let result = with_pickup_number(
        &db.pool,
        PickupNamespace::Reservation,
        day(2026, 5, 4),
        move |slot| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(AttemptError::Collision(slot.number))
            }
        },
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::SequenceExhausted);
    assert_eq!(calls.load(Ordering::SeqCst), MAX_PICKUP_ATTEMPTS);
}
