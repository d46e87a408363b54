//! Shared fixtures: a migrated SQLite database in a temp dir plus seed helpers.

#![allow(dead_code)]

use chrono::NaiveDate;
use pickup_server::db::DbService;
use pickup_server::db::repository::{cart, product};
use shared::models::{CartLine, CartLineCreate, Product, ProductCreate, VariantSelections};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const ALICE: i64 = 1001;
pub const BOB: i64 = 1002;

pub struct TestDb {
    pub pool: SqlitePool,
    // keeps the directory alive for the pool's lifetime
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("pickup.db");
    let db = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open database");
    TestDb {
        pool: db.pool,
        _dir: dir,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Listed product with `stock` units
pub async fn stocked(pool: &SqlitePool, name: &str, price: f64, stock: i64) -> Product {
    product::create(
        pool,
        ProductCreate {
            name: name.into(),
            price,
            unlimited_supply: false,
            available_num: Some(stock),
            available: true,
            reservation_enabled: false,
        },
    )
    .await
    .expect("create product")
}

/// Listed product exempt from stock accounting
pub async fn unlimited(pool: &SqlitePool, name: &str, price: f64) -> Product {
    product::create(
        pool,
        ProductCreate {
            name: name.into(),
            price,
            unlimited_supply: true,
            available_num: None,
            available: true,
            reservation_enabled: false,
        },
    )
    .await
    .expect("create product")
}

/// Sold-out product that accepts reservations
pub async fn reservable(pool: &SqlitePool, name: &str, price: f64) -> Product {
    product::create(
        pool,
        ProductCreate {
            name: name.into(),
            price,
            unlimited_supply: false,
            available_num: Some(0),
            available: true,
            reservation_enabled: true,
        },
    )
    .await
    .expect("create product")
}

pub async fn add_line(pool: &SqlitePool, user_id: i64, product_id: i64, quantity: i64) -> CartLine {
    add_line_with(pool, user_id, product_id, quantity, VariantSelections::new()).await
}

pub async fn add_line_with(
    pool: &SqlitePool,
    user_id: i64,
    product_id: i64,
    quantity: i64,
    variant_selections: VariantSelections,
) -> CartLine {
    cart::create(
        pool,
        user_id,
        CartLineCreate {
            product_id,
            quantity,
            variant_selections,
        },
    )
    .await
    .expect("create cart line")
}

pub async fn stock_of(pool: &SqlitePool, product_id: i64) -> Option<i64> {
    product::find_by_id(pool, product_id)
        .await
        .expect("load product")
        .expect("product exists")
        .available_num
}
