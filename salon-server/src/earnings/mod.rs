//! Staff Earning Aggregator
//!
//! Derives per-staff commission and tip earnings from checked-out
//! appointments and their payments, maintains the StaffEarning working
//! aggregate, and executes payouts. Payouts are serialized per staff id so
//! two concurrent payout calls can never both collect the same unpaid
//! lines.

pub mod commission;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use tokio::sync::Mutex;

use crate::db::repository::{
    qualify, AppointmentRepository, PaymentRepository, RevenueCommissionRepository,
    StaffEarningRepository, StaffPaymentRepository, StaffRepository,
};
use crate::money::{round_money, to_decimal, to_f64};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Appointment, RevenueCommission, ServiceLine, Staff, StaffEarning, StaffEarningView,
    StaffPayment, StaffPayoutRequest,
};

/// Per-staff payout locks. A payout holds its staff's lock across
/// read-compute-mark-persist, so duplicate payout calls line up instead of
/// double-paying.
#[derive(Debug, Default)]
pub struct PayoutLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PayoutLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub fn lock_for(&self, staff_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(staff_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Earnings derived from currently-unpaid lines, plus the aggregate
/// updates that would mark those lines paid
struct UnpaidDerivation {
    total_booking: i64,
    service_amount: f64,
    commission_earning: f64,
    tip_earning: f64,
    paid_updates: Vec<(String, Vec<ServiceLine>)>,
}

pub struct EarningsAggregator {
    appointments: AppointmentRepository,
    payments: PaymentRepository,
    staff: StaffRepository,
    commissions: RevenueCommissionRepository,
    earnings: StaffEarningRepository,
    staff_payments: StaffPaymentRepository,
    locks: Arc<PayoutLocks>,
}

impl EarningsAggregator {
    pub fn new(db: Surreal<Db>, locks: Arc<PayoutLocks>) -> Self {
        Self {
            appointments: AppointmentRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            staff: StaffRepository::new(db.clone()),
            commissions: RevenueCommissionRepository::new(db.clone()),
            earnings: StaffEarningRepository::new(db.clone()),
            staff_payments: StaffPaymentRepository::new(db),
            locks,
        }
    }

    /// Idempotent full recompute over every staff member of the tenant.
    ///
    /// Counts every service line of checked-out appointments (paid or
    /// not), attributes equal tip shares, resolves tiered commission, and
    /// upserts the StaffEarning aggregate per staff.
    pub async fn recompute(&self, salon_id: &str) -> AppResult<Vec<StaffEarningView>> {
        let staff_list = self.staff.find_all(salon_id).await?;
        let mut appointments = self.appointments.find_checked_out(salon_id).await?;
        let payments = self.payments.find_all(salon_id).await?;
        let rules = self.load_rules(&staff_list).await?;

        // Attribute per-line commission in place, then persist each
        // aggregate once
        let staff_rule: HashMap<&str, Option<&RevenueCommission>> = staff_list
            .iter()
            .filter_map(|s| s.id.as_deref().map(|id| (id, rule_for(s, &rules))))
            .collect();

        for appointment in &mut appointments {
            let mut changed = false;
            for line in &mut appointment.services {
                let commission = staff_rule
                    .get(line.staff.as_str())
                    .copied()
                    .flatten()
                    .map(|rule| to_f64(commission::commission_for_amount(rule, line.amount)));
                if line.commission_earned != commission {
                    line.commission_earned = commission;
                    changed = true;
                }
            }
            if changed
                && let Some(id) = appointment.id.clone()
            {
                self.appointments
                    .replace_services(&id, appointment.services.clone())
                    .await?;
            }
        }

        let mut views = Vec::with_capacity(staff_list.len());
        for staff in &staff_list {
            let Some(staff_id) = staff.id.as_deref() else {
                continue;
            };

            let mut amounts = Vec::new();
            for appointment in &appointments {
                for line in &appointment.services {
                    if line.staff == staff_id {
                        amounts.push(line.amount);
                    }
                }
            }
            let total_booking = amounts.len() as i64;
            let service_amount: Decimal = amounts.iter().map(|a| to_decimal(*a)).sum();

            let commission_earning = match rule_for(staff, &rules) {
                Some(rule) => commission::commission_total(rule, &amounts),
                None => 0.0,
            };

            let tip_earning = tip_share(staff_id, &appointments, &payments);
            let staff_earning = to_f64(to_decimal(commission_earning) + to_decimal(tip_earning));

            self.earnings
                .upsert(StaffEarning {
                    id: None,
                    salon: qualify("salon", salon_id),
                    staff: staff_id.to_string(),
                    total_booking,
                    service_amount: to_f64(service_amount),
                    commission_earning,
                    tip_earning,
                    staff_earning,
                    updated_at: shared::util::now_millis(),
                })
                .await?;

            views.push(StaffEarningView {
                staff_id: staff_id.to_string(),
                staff_name: staff.full_name.clone(),
                total_booking,
                service_amount: to_f64(service_amount),
                commission_earning,
                tip_earning,
                staff_earning,
            });
        }

        Ok(views)
    }

    /// Earnings still owed to one staff member (unpaid lines only)
    pub async fn staff_detail(
        &self,
        salon_id: &str,
        staff_id: &str,
    ) -> AppResult<StaffEarningView> {
        let staff = self
            .staff
            .find_in_salon(salon_id, staff_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {} not found", staff_id)))?;

        let derivation = self.derive_unpaid(salon_id, &staff).await?;
        let staff_earning = to_f64(
            to_decimal(derivation.commission_earning) + to_decimal(derivation.tip_earning),
        );

        Ok(StaffEarningView {
            staff_id: staff.id.clone().unwrap_or_default(),
            staff_name: staff.full_name.clone(),
            total_booking: derivation.total_booking,
            service_amount: derivation.service_amount,
            commission_earning: derivation.commission_earning,
            tip_earning: derivation.tip_earning,
            staff_earning,
        })
    }

    /// Pay out everything currently owed to a staff member.
    ///
    /// Holds the per-staff lock across derive → persist StaffPayment →
    /// mark lines paid → drop the aggregate, so a concurrent duplicate
    /// call settles on zero unpaid lines instead of paying twice.
    pub async fn payout(
        &self,
        staff_id: &str,
        req: StaffPayoutRequest,
    ) -> AppResult<StaffPayment> {
        if req.payment_method.trim().is_empty() {
            return Err(AppError::invalid("Payment method is required"));
        }
        let salon_id = req.salon_id.clone();

        let staff = self
            .staff
            .find_in_salon(&salon_id, staff_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {} not found", staff_id)))?;
        let staff_ref = staff.id.clone().unwrap_or_default();

        let lock = self.locks.lock_for(&staff_ref);
        let _guard = lock.lock().await;

        let derivation = self.derive_unpaid(&salon_id, &staff).await?;
        let total_paid = to_f64(
            to_decimal(derivation.commission_earning) + to_decimal(derivation.tip_earning),
        );

        let payment = self
            .staff_payments
            .create(StaffPayment {
                id: None,
                salon: qualify("salon", &salon_id),
                staff: staff_ref.clone(),
                total_paid,
                payment_method: req.payment_method.to_lowercase(),
                description: req.description,
                tips: derivation.tip_earning,
                commission_amount: derivation.commission_earning,
                paid_at: shared::util::now_millis(),
            })
            .await?;

        for (appointment_id, services) in derivation.paid_updates {
            self.appointments
                .replace_services(&appointment_id, services)
                .await?;
        }

        // The working aggregate is a cache, superseded by the payout record
        self.earnings.delete_by_staff(&salon_id, &staff_ref).await?;

        tracing::info!(
            staff = %staff_ref,
            total_paid,
            "Staff payout recorded"
        );

        Ok(payment)
    }

    /// Derive commission and tips from currently-unpaid service lines, and
    /// prepare the paid-flag updates that a payout would apply
    async fn derive_unpaid(&self, salon_id: &str, staff: &Staff) -> AppResult<UnpaidDerivation> {
        let staff_id = staff.id.as_deref().unwrap_or_default();
        let appointments = self.appointments.find_checked_out(salon_id).await?;
        let payments = self.payments.find_all(salon_id).await?;

        let mut amounts = Vec::new();
        let mut paid_updates = Vec::new();
        let mut affected: HashSet<String> = HashSet::new();

        for appointment in &appointments {
            let has_unpaid = appointment
                .services
                .iter()
                .any(|line| line.staff == staff_id && !line.paid);
            if !has_unpaid {
                continue;
            }
            let Some(appointment_id) = appointment.id.clone() else {
                continue;
            };
            affected.insert(appointment_id.clone());

            let mut services = appointment.services.clone();
            for line in &mut services {
                if line.staff == staff_id && !line.paid {
                    amounts.push(line.amount);
                    line.paid = true;
                }
            }
            paid_updates.push((appointment_id, services));
        }

        let commission_earning = match self.rule_of(staff).await? {
            Some(rule) => commission::commission_total(&rule, &amounts),
            None => 0.0,
        };

        // Equal tip split across the distinct staff of each affected
        // appointment, as in the full recompute
        let affected_appointments: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.id.as_ref().is_some_and(|id| affected.contains(id)))
            .collect();
        let mut tip_total = Decimal::ZERO;
        for payment in &payments {
            if payment.tips <= 0.0 {
                continue;
            }
            if let Some(appointment) = affected_appointments
                .iter()
                .find(|a| a.id.as_deref() == Some(payment.appointment.as_str()))
            {
                let staff_set: HashSet<&str> = appointment
                    .services
                    .iter()
                    .map(|line| line.staff.as_str())
                    .collect();
                if staff_set.contains(staff_id) && !staff_set.is_empty() {
                    tip_total +=
                        to_decimal(payment.tips) / Decimal::from(staff_set.len() as i64);
                }
            }
        }

        let service_amount: Decimal = amounts.iter().map(|a| to_decimal(*a)).sum();
        Ok(UnpaidDerivation {
            total_booking: amounts.len() as i64,
            service_amount: to_f64(service_amount),
            commission_earning,
            tip_earning: to_f64(round_money(tip_total)),
            paid_updates,
        })
    }

    /// Load each staff member's assigned commission rule once
    async fn load_rules(
        &self,
        staff_list: &[Staff],
    ) -> AppResult<HashMap<String, RevenueCommission>> {
        let mut rules = HashMap::new();
        for staff in staff_list {
            if let Some(rule_id) = &staff.commission
                && !rules.contains_key(rule_id)
                && let Some(rule) = self.commissions.find_by_id(rule_id).await?
            {
                rules.insert(rule_id.clone(), rule);
            }
        }
        Ok(rules)
    }

    async fn rule_of(&self, staff: &Staff) -> AppResult<Option<RevenueCommission>> {
        match &staff.commission {
            Some(rule_id) => Ok(self.commissions.find_by_id(rule_id).await?),
            None => Ok(None),
        }
    }
}

fn rule_for<'a>(
    staff: &Staff,
    rules: &'a HashMap<String, RevenueCommission>,
) -> Option<&'a RevenueCommission> {
    staff.commission.as_ref().and_then(|id| rules.get(id))
}

/// Equal tip share for one staff member over all checked-out appointments:
/// each payment's tips split evenly across the distinct staff referenced by
/// its appointment's service lines
fn tip_share(
    staff_id: &str,
    appointments: &[Appointment],
    payments: &[shared::models::Payment],
) -> f64 {
    let mut total = Decimal::ZERO;
    for payment in payments {
        if payment.tips <= 0.0 {
            continue;
        }
        let Some(appointment) = appointments
            .iter()
            .find(|a| a.id.as_deref() == Some(payment.appointment.as_str()))
        else {
            continue;
        };
        let staff_set: HashSet<&str> = appointment
            .services
            .iter()
            .map(|line| line.staff.as_str())
            .collect();
        if staff_set.contains(staff_id) && !staff_set.is_empty() {
            total += to_decimal(payment.tips) / Decimal::from(staff_set.len() as i64);
        }
    }
    to_f64(round_money(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        AppointmentStatus, Payment, PaymentStatus, ProductLine,
    };

    fn appointment(id: &str, staff_ids: &[&str]) -> Appointment {
        Appointment {
            id: Some(id.to_string()),
            salon: "salon:s1".to_string(),
            customer: "customer:c1".to_string(),
            branch: "branch:b1".to_string(),
            appointment_date: 0,
            appointment_time: "10:00".to_string(),
            services: staff_ids
                .iter()
                .map(|staff| ServiceLine {
                    service: "service:sv1".to_string(),
                    staff: staff.to_string(),
                    amount: 100.0,
                    used_package: false,
                    package: None,
                    paid: false,
                    commission_earned: None,
                })
                .collect(),
            products: Vec::<ProductLine>::new(),
            notes: None,
            status: AppointmentStatus::CheckOut,
            payment_status: PaymentStatus::Paid,
            service_total: 0.0,
            product_total: 0.0,
            total_payment: 0.0,
            order_code: "ORD-1".to_string(),
            created_at: 0,
        }
    }

    fn payment(appointment_id: &str, tips: f64) -> Payment {
        Payment {
            id: Some(format!("payment:{}", appointment_id)),
            salon: "salon:s1".to_string(),
            branch: "branch:b1".to_string(),
            appointment: appointment_id.to_string(),
            service_amount: 0.0,
            product_amount: 0.0,
            sub_total: 0.0,
            coupon: None,
            coupon_discount: 0.0,
            additional_discount: 0.0,
            tax: None,
            tax_amount: 0.0,
            tips,
            final_total: 0.0,
            payment_method: "cash".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn test_tip_share_splits_evenly_across_distinct_staff() {
        let appointments = vec![appointment("appointment:a1", &["staff:x", "staff:y"])];
        let payments = vec![payment("appointment:a1", 90.0)];

        assert_eq!(tip_share("staff:x", &appointments, &payments), 45.0);
        assert_eq!(tip_share("staff:y", &appointments, &payments), 45.0);
        assert_eq!(tip_share("staff:z", &appointments, &payments), 0.0);
    }

    #[test]
    fn test_tip_share_counts_distinct_staff_once() {
        // Two lines by the same staff member still split by 1
        let appointments = vec![appointment("appointment:a1", &["staff:x", "staff:x"])];
        let payments = vec![payment("appointment:a1", 60.0)];

        assert_eq!(tip_share("staff:x", &appointments, &payments), 60.0);
    }

    #[test]
    fn test_tip_share_ignores_zero_tip_payments() {
        let appointments = vec![appointment("appointment:a1", &["staff:x"])];
        let payments = vec![payment("appointment:a1", 0.0)];

        assert_eq!(tip_share("staff:x", &appointments, &payments), 0.0);
    }

    #[test]
    fn test_tip_share_accumulates_across_appointments() {
        let appointments = vec![
            appointment("appointment:a1", &["staff:x", "staff:y"]),
            appointment("appointment:a2", &["staff:x"]),
        ];
        let payments = vec![
            payment("appointment:a1", 50.0),
            payment("appointment:a2", 20.0),
        ];

        assert_eq!(tip_share("staff:x", &appointments, &payments), 45.0);
    }

    #[test]
    fn test_payout_locks_hand_out_one_mutex_per_staff() {
        let locks = PayoutLocks::new();
        let a1 = locks.lock_for("staff:a");
        let a2 = locks.lock_for("staff:a");
        let b = locks.lock_for("staff:b");
        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
    }
}
