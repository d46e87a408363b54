//! Pricing Resolver
//!
//! Adjusted unit price = base price + Σ variant price modifiers.
//! Line total = adjusted unit price × quantity; order total = Σ line totals.
//! Pure functions, no storage access.

pub mod money;

use crate::utils::{AppError, AppResult, ErrorCode};
use money::{MAX_PRICE, MAX_QUANTITY, round_money, to_decimal};
use rust_decimal::Decimal;
use shared::models::VariantSelections;

/// One priced line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub unit_price: Decimal,
    pub quantity: i64,
    pub line_total: Decimal,
}

fn require_finite(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must be a finite number, got {value}"),
        ));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity <= 0 || quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity must be between 1 and {MAX_QUANTITY}, got {quantity}"),
        )
        .with_detail("quantity", quantity));
    }
    Ok(())
}

/// Base price plus every selected option's modifier
pub fn unit_price(base_price: f64, selections: &VariantSelections) -> AppResult<Decimal> {
    require_finite(base_price, "price")?;
    if !(0.0..=MAX_PRICE).contains(&base_price) {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("price must be between 0 and {MAX_PRICE}, got {base_price}"),
        ));
    }

    let mut unit = to_decimal(base_price);
    for (variant_type, option) in selections.iter() {
        require_finite(option.price_modifier, "price_modifier")?;
        if option.price_modifier.abs() > MAX_PRICE {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!(
                    "price_modifier of {variant_type} exceeds maximum allowed, got {}",
                    option.price_modifier
                ),
            ));
        }
        unit += to_decimal(option.price_modifier);
    }

    let unit = round_money(unit);
    if unit.is_sign_negative() && !unit.is_zero() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Adjusted unit price is negative: {unit}"),
        ));
    }
    Ok(unit)
}

/// Price a single line
pub fn price_line(
    base_price: f64,
    selections: &VariantSelections,
    quantity: i64,
) -> AppResult<PricedLine> {
    validate_quantity(quantity)?;
    let unit_price = unit_price(base_price, selections)?;
    let line_total = round_money(unit_price * Decimal::from(quantity));
    Ok(PricedLine {
        unit_price,
        quantity,
        line_total,
    })
}

/// Σ line totals
pub fn order_total(lines: &[PricedLine]) -> Decimal {
    round_money(lines.iter().map(|l| l.line_total).sum())
}
