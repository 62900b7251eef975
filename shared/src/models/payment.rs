//! Payment Model (appointment settlement)

use serde::{Deserialize, Serialize};

/// Payment entity — the settlement record of one appointment.
///
/// Invariant: `final_total == sub_total - coupon_discount -
/// additional_discount + tax_amount + tips`, every component clamped to
/// non-negative. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branch: String,
    pub appointment: String,
    pub service_amount: f64,
    pub product_amount: f64,
    pub sub_total: f64,
    pub coupon: Option<String>,
    pub coupon_discount: f64,
    pub additional_discount: f64,
    pub tax: Option<String>,
    pub tax_amount: f64,
    pub tips: f64,
    pub final_total: f64,
    pub payment_method: String,
    pub created_at: i64,
}

/// Settle request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub appointment_id: String,
    pub payment_method: String,
    pub coupon_id: Option<String>,
    pub tax_id: Option<String>,
    #[serde(default)]
    pub additional_discount: f64,
    #[serde(default)]
    pub tips: f64,
}
