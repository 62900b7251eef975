//! Commission slot parsing, validation and matching
//!
//! A commission rule is an ordered list of "min-max" amount ranges. Ranges
//! are validated non-overlapping when the rule is written; at read time the
//! first slot containing the amount wins and an uncovered amount simply
//! contributes nothing.

use rust_decimal::Decimal;

use crate::money::{percent_of, round_money, to_decimal, to_f64};
use crate::utils::{AppError, AppResult};
use shared::models::{CommissionSlot, CommissionType, RevenueCommission};

/// Parse a "min-max" slot string into inclusive numeric bounds
pub fn parse_slot(slot: &str) -> AppResult<(f64, f64)> {
    let (min_str, max_str) = slot
        .split_once('-')
        .ok_or_else(|| AppError::validation(format!("Invalid commission slot: {}", slot)))?;
    let min: f64 = min_str
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid commission slot: {}", slot)))?;
    let max: f64 = max_str
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid commission slot: {}", slot)))?;
    if !min.is_finite() || !max.is_finite() || min < 0.0 {
        return Err(AppError::validation(format!(
            "Invalid commission slot: {}",
            slot
        )));
    }
    if max < min {
        return Err(AppError::validation(format!(
            "Commission slot {} has max below min",
            slot
        )));
    }
    Ok((min, max))
}

/// Validate a slot list at commission write time: every slot parseable,
/// no two ranges overlapping. Gaps are allowed — uncovered amounts earn no
/// commission.
pub fn validate_slots(slots: &[CommissionSlot]) -> AppResult<()> {
    if slots.is_empty() {
        return Err(AppError::validation(
            "Commission requires at least one slot",
        ));
    }

    let mut ranges = Vec::with_capacity(slots.len());
    for slot in slots {
        if !slot.amount.is_finite() || slot.amount < 0.0 {
            return Err(AppError::validation(format!(
                "Invalid commission amount for slot {}",
                slot.slot
            )));
        }
        ranges.push(parse_slot(&slot.slot)?);
    }

    ranges.sort_by(|a, b| a.0.total_cmp(&b.0));
    for window in ranges.windows(2) {
        let (_, prev_max) = window[0];
        let (next_min, _) = window[1];
        if next_min <= prev_max {
            return Err(AppError::validation(format!(
                "Commission slots overlap around {}",
                next_min
            )));
        }
    }

    Ok(())
}

/// Commission contribution for one service amount: first slot whose
/// inclusive range contains the amount wins; no matching slot → 0.
pub fn commission_for_amount(rule: &RevenueCommission, amount: f64) -> Decimal {
    let matching = rule.commission.iter().find(|slot| {
        parse_slot(&slot.slot)
            .map(|(min, max)| amount >= min && amount <= max)
            .unwrap_or(false)
    });

    let Some(slot) = matching else {
        return Decimal::ZERO;
    };

    match rule.commission_type {
        CommissionType::Percentage => percent_of(to_decimal(amount), slot.amount),
        CommissionType::Fixed => to_decimal(slot.amount),
    }
}

/// Total commission over a set of service amounts, rounded to 2 decimals
pub fn commission_total(rule: &RevenueCommission, amounts: &[f64]) -> f64 {
    let total: Decimal = amounts
        .iter()
        .map(|amount| commission_for_amount(rule, *amount))
        .sum();
    to_f64(round_money(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(commission_type: CommissionType, slots: &[(&str, f64)]) -> RevenueCommission {
        RevenueCommission {
            id: Some("revenue_commission:r1".to_string()),
            salon: "salon:s1".to_string(),
            branch: "branch:b1".to_string(),
            commission_name: "Stylist tiers".to_string(),
            commission_type,
            commission: slots
                .iter()
                .map(|(slot, amount)| CommissionSlot {
                    slot: slot.to_string(),
                    amount: *amount,
                })
                .collect(),
            created_at: 0,
        }
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("0-500").unwrap(), (0.0, 500.0));
        assert_eq!(parse_slot("501 - 1000").unwrap(), (501.0, 1000.0));
        assert!(parse_slot("abc").is_err());
        assert!(parse_slot("10-abc").is_err());
        assert!(parse_slot("500-100").is_err());
    }

    #[test]
    fn test_percentage_slot_selection() {
        // Slots 0-500@10%, 501-1000@15%; amount 700 → 105.00
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("501-1000", 15.0)],
        );
        assert_eq!(to_f64(commission_for_amount(&r, 700.0)), 105.0);
        assert_eq!(to_f64(commission_for_amount(&r, 500.0)), 50.0);
        assert_eq!(to_f64(commission_for_amount(&r, 501.0)), 75.15);
    }

    #[test]
    fn test_amount_outside_all_slots_contributes_zero() {
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("501-1000", 15.0)],
        );
        assert_eq!(commission_for_amount(&r, 1200.0), Decimal::ZERO);
    }

    #[test]
    fn test_fixed_commission() {
        let r = rule(CommissionType::Fixed, &[("0-500", 25.0), ("501-1000", 60.0)]);
        assert_eq!(to_f64(commission_for_amount(&r, 300.0)), 25.0);
        assert_eq!(to_f64(commission_for_amount(&r, 999.0)), 60.0);
    }

    #[test]
    fn test_commission_total_rounds_to_cents() {
        let r = rule(CommissionType::Percentage, &[("0-1000", 33.33)]);
        // 3 × 33.33% of 100 = 3 × 33.33 = 99.99
        assert_eq!(commission_total(&r, &[100.0, 100.0, 100.0]), 99.99);
    }

    #[test]
    fn test_commission_total_spec_case() {
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("501-1000", 15.0)],
        );
        // 700 matches the second slot, 1200 matches nothing
        assert_eq!(commission_total(&r, &[700.0, 1200.0]), 105.0);
    }

    #[test]
    fn test_validate_slots_accepts_disjoint_ranges() {
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("501-1000", 15.0), ("1001-5000", 20.0)],
        );
        assert!(validate_slots(&r.commission).is_ok());
    }

    #[test]
    fn test_validate_slots_rejects_overlap() {
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("400-1000", 15.0)],
        );
        assert!(validate_slots(&r.commission).is_err());
    }

    #[test]
    fn test_validate_slots_rejects_shared_boundary() {
        // 500 would match both ranges — ambiguous, rejected at write time
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("500-1000", 15.0)],
        );
        assert!(validate_slots(&r.commission).is_err());
    }

    #[test]
    fn test_validate_slots_allows_gaps() {
        let r = rule(
            CommissionType::Percentage,
            &[("0-500", 10.0), ("800-1000", 15.0)],
        );
        assert!(validate_slots(&r.commission).is_ok());
    }

    #[test]
    fn test_validate_slots_rejects_empty_and_bad_amounts() {
        assert!(validate_slots(&[]).is_err());
        let r = rule(CommissionType::Percentage, &[("0-500", -1.0)]);
        assert!(validate_slots(&r.commission).is_err());
    }
}
