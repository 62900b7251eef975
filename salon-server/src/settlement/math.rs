//! Settlement math — pure functions, Decimal throughout
//!
//! `final_total = sub_total - coupon_discount - additional_discount
//!               + tax_amount + tips`
//!
//! Coupon and tax contribute 0 unless valid at settlement time; tax is
//! computed on the sub-total and is not reduced by discounts.

use rust_decimal::Decimal;

use crate::money::{self, percent_of, to_decimal, to_f64};
use crate::utils::AppResult;
use shared::models::{Coupon, DiscountType, Tax};

/// Computed settlement components, all non-negative, rounded to the cent
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementBreakdown {
    pub coupon_discount: f64,
    pub additional_discount: f64,
    pub tax_amount: f64,
    pub tips: f64,
    pub final_total: f64,
}

/// Coupon discount on `sub_total` — 0 unless the coupon is active and `now`
/// falls inside its validity window. Expired or inactive coupons are
/// silently ignored rather than failing the settlement.
pub fn coupon_discount(sub_total: Decimal, coupon: Option<&Coupon>, now: i64) -> Decimal {
    let Some(coupon) = coupon else {
        return Decimal::ZERO;
    };
    if !coupon.is_active || now < coupon.start_date || now > coupon.end_date {
        return Decimal::ZERO;
    }
    let discount = match coupon.discount_type {
        DiscountType::Percent => percent_of(sub_total, coupon.discount_amount),
        DiscountType::Fixed => to_decimal(coupon.discount_amount),
    };
    discount.max(Decimal::ZERO)
}

/// Tax on `sub_total` — 0 unless the tax is active. Computed before any
/// discount is applied.
pub fn tax_amount(sub_total: Decimal, tax: Option<&Tax>) -> Decimal {
    let Some(tax) = tax else {
        return Decimal::ZERO;
    };
    if !tax.is_active {
        return Decimal::ZERO;
    }
    let amount = match tax.tax_type {
        DiscountType::Percent => percent_of(sub_total, tax.value),
        DiscountType::Fixed => to_decimal(tax.value),
    };
    amount.max(Decimal::ZERO)
}

/// Compute the full settlement breakdown.
///
/// `additional_discount` and `tips` come straight off the request; they are
/// validated finite and clamped to non-negative.
pub fn compute(
    sub_total: Decimal,
    coupon: Option<&Coupon>,
    tax: Option<&Tax>,
    additional_discount: f64,
    tips: f64,
    now: i64,
) -> AppResult<SettlementBreakdown> {
    money::require_finite(additional_discount, "additional_discount")?;
    money::require_finite(tips, "tips")?;

    let coupon_discount = coupon_discount(sub_total, coupon, now);
    let tax_amount = tax_amount(sub_total, tax);
    let additional = to_decimal(additional_discount).max(Decimal::ZERO);
    let tips = to_decimal(tips).max(Decimal::ZERO);

    let final_total = sub_total - coupon_discount - additional + tax_amount + tips;

    Ok(SettlementBreakdown {
        coupon_discount: to_f64(coupon_discount),
        additional_discount: to_f64(additional),
        tax_amount: to_f64(tax_amount),
        tips: to_f64(tips),
        final_total: to_f64(final_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(
        discount_type: DiscountType,
        amount: f64,
        is_active: bool,
        start: i64,
        end: i64,
    ) -> Coupon {
        Coupon {
            id: Some("coupon:c1".to_string()),
            salon: "salon:s1".to_string(),
            branches: vec![],
            name: "Welcome".to_string(),
            description: None,
            coupon_code: "WELCOME".to_string(),
            discount_type,
            discount_amount: amount,
            start_date: start,
            end_date: end,
            use_limit: None,
            is_active,
            created_at: 0,
        }
    }

    fn tax(tax_type: DiscountType, value: f64, is_active: bool) -> Tax {
        Tax {
            id: Some("tax:t1".to_string()),
            salon: "salon:s1".to_string(),
            branches: vec![],
            title: "GST".to_string(),
            value,
            tax_type,
            is_active,
            created_at: 0,
        }
    }

    const NOW: i64 = 1_000_000;

    #[test]
    fn test_no_coupon_no_tax_with_tips() {
        // sub_total=500, tips=50 → final_total=550
        let breakdown =
            compute(to_decimal(500.0), None, None, 0.0, 50.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 0.0);
        assert_eq!(breakdown.tax_amount, 0.0);
        assert_eq!(breakdown.tips, 50.0);
        assert_eq!(breakdown.final_total, 550.0);
    }

    #[test]
    fn test_percent_coupon_and_percent_tax() {
        // 10% coupon + 5% tax on sub_total=1000 → discount=100, tax=50,
        // final=950 (no tips/additional)
        let c = coupon(DiscountType::Percent, 10.0, true, 0, 2_000_000);
        let t = tax(DiscountType::Percent, 5.0, true);
        let breakdown =
            compute(to_decimal(1000.0), Some(&c), Some(&t), 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 100.0);
        assert_eq!(breakdown.tax_amount, 50.0);
        assert_eq!(breakdown.final_total, 950.0);
    }

    #[test]
    fn test_expired_coupon_is_ignored() {
        let c = coupon(DiscountType::Percent, 10.0, true, 0, NOW - 1);
        let breakdown =
            compute(to_decimal(1000.0), Some(&c), None, 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 0.0);
        assert_eq!(breakdown.final_total, 1000.0);
    }

    #[test]
    fn test_not_yet_valid_coupon_is_ignored() {
        let c = coupon(DiscountType::Percent, 10.0, true, NOW + 1, NOW + 100);
        let breakdown =
            compute(to_decimal(1000.0), Some(&c), None, 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 0.0);
    }

    #[test]
    fn test_inactive_coupon_and_tax_are_ignored() {
        let c = coupon(DiscountType::Fixed, 100.0, false, 0, 2_000_000);
        let t = tax(DiscountType::Percent, 5.0, false);
        let breakdown =
            compute(to_decimal(1000.0), Some(&c), Some(&t), 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 0.0);
        assert_eq!(breakdown.tax_amount, 0.0);
        assert_eq!(breakdown.final_total, 1000.0);
    }

    #[test]
    fn test_fixed_coupon_and_fixed_tax() {
        let c = coupon(DiscountType::Fixed, 75.0, true, 0, 2_000_000);
        let t = tax(DiscountType::Fixed, 18.0, true);
        let breakdown =
            compute(to_decimal(500.0), Some(&c), Some(&t), 25.0, 10.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 75.0);
        assert_eq!(breakdown.tax_amount, 18.0);
        assert_eq!(breakdown.additional_discount, 25.0);
        // 500 - 75 - 25 + 18 + 10
        assert_eq!(breakdown.final_total, 428.0);
    }

    #[test]
    fn test_tax_is_computed_on_subtotal_not_discounted_base() {
        // 50% coupon must not halve the tax
        let c = coupon(DiscountType::Percent, 50.0, true, 0, 2_000_000);
        let t = tax(DiscountType::Percent, 10.0, true);
        let breakdown =
            compute(to_decimal(1000.0), Some(&c), Some(&t), 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.tax_amount, 100.0);
        assert_eq!(breakdown.final_total, 600.0);
    }

    #[test]
    fn test_negative_components_are_clamped() {
        let c = coupon(DiscountType::Fixed, -40.0, true, 0, 2_000_000);
        let breakdown =
            compute(to_decimal(100.0), Some(&c), None, -5.0, -1.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 0.0);
        assert_eq!(breakdown.additional_discount, 0.0);
        assert_eq!(breakdown.tips, 0.0);
        assert_eq!(breakdown.final_total, 100.0);
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        assert!(compute(to_decimal(100.0), None, None, f64::NAN, 0.0, NOW).is_err());
        assert!(compute(to_decimal(100.0), None, None, 0.0, f64::INFINITY, NOW).is_err());
    }

    #[test]
    fn test_percent_rounding_at_the_cent() {
        // 10% of 33.33 → 3.33 (not 3.333)
        let c = coupon(DiscountType::Percent, 10.0, true, 0, 2_000_000);
        let breakdown =
            compute(to_decimal(33.33), Some(&c), None, 0.0, 0.0, NOW).unwrap();
        assert_eq!(breakdown.coupon_discount, 3.33);
        assert_eq!(breakdown.final_total, 30.0);
    }
}
