//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;

use crate::utils::AppError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per line (₹10,000,000)
const MAX_PRICE: f64 = 10_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i64 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a unit price before pricing a line
pub fn validate_price(price: f64, field_name: &str) -> Result<(), AppError> {
    require_finite(price, field_name)?;
    if price < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            field_name, price
        )));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a line quantity: positive integer within bounds
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to 2 places (half away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage of a base amount, rounded to 2 places
///
/// `percent_of(1000, 10)` == 100.00
pub fn percent_of(base: Decimal, percent: f64) -> Decimal {
    round_money(base * to_decimal(percent) / Decimal::ONE_HUNDRED)
}

/// Line total with precise arithmetic: `unit_price * quantity`
pub fn line_total(unit_price: f64, quantity: i64) -> Decimal {
    round_money(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let a = 0.1_f64;
        let b = 0.2_f64;
        let sum_f64 = a + b;

        // f64 fails
        assert_ne!(sum_f64, 0.3);

        // Decimal succeeds
        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(to_f64(line_total(10.99, 3)), 32.97);
        assert_eq!(to_f64(line_total(0.01, 100)), 1.0);
        assert_eq!(to_f64(line_total(0.0, 5)), 0.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(to_f64(percent_of(to_decimal(1000.0), 10.0)), 100.0);
        assert_eq!(to_f64(percent_of(to_decimal(1000.0), 5.0)), 50.0);
        // 33.33% of 100 rounds at the cent
        assert_eq!(to_f64(percent_of(to_decimal(100.0), 33.33)), 33.33);
    }

    #[test]
    fn test_rounding_half_up() {
        // 0.005 should round up to 0.01
        let value = Decimal::new(5, 3); // 0.005
        assert_eq!(round_money(value).to_f64().unwrap(), 0.01);

        // 0.004 should round down to 0.00
        let value2 = Decimal::new(4, 3); // 0.004
        assert_eq!(round_money(value2).to_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    // ========================================================================
    // Decimal 转换边界测试
    // ========================================================================

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        // NaN 被 Decimal::from_f64 拒绝，unwrap_or_default 返回 0
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_infinity_becomes_zero() {
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_require_finite_rejects_nan_and_infinity() {
        assert!(require_finite(f64::NAN, "price").is_err());
        assert!(require_finite(f64::INFINITY, "price").is_err());
        assert!(require_finite(12.5, "price").is_ok());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(999.99, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(10000).is_err());
    }
}
