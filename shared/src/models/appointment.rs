//! Appointment Model
//!
//! The appointment aggregate owns its service and product lines as value
//! collections. Lines are only ever rewritten through the booking engine's
//! re-pricing path, so `total_payment == Σ service amounts + Σ product
//! totals` is enforced in one place.

use serde::{Deserialize, Serialize};

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "upcoming")]
    Upcoming,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Upcoming
    }
}

/// Settlement state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One booked service with its resolved amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    pub service: String,
    pub staff: String,
    /// Resolved amount — 0 when covered by a package
    pub amount: f64,
    pub used_package: bool,
    /// The consumed package's id when `used_package`
    pub package: Option<String>,
    /// Set true once this line's earnings were paid out to the staff
    #[serde(default)]
    pub paid: bool,
    /// Commission attributed by the last earnings recompute
    pub commission_earned: Option<f64>,
}

/// One purchased product with its resolved pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLine {
    pub product: String,
    pub variant: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Appointment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub customer: String,
    pub branch: String,
    /// Unix millis (start of the booked day)
    pub appointment_date: i64,
    /// Wall-clock slot, e.g. "14:30"
    pub appointment_time: String,
    pub services: Vec<ServiceLine>,
    pub products: Vec<ProductLine>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub service_total: f64,
    pub product_total: f64,
    pub total_payment: f64,
    pub order_code: String,
    pub created_at: i64,
}

/// Requested service line (pricing is resolved server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLineInput {
    pub service_id: String,
    pub staff_id: String,
}

/// Requested product line (pricing is resolved server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLineInput {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub quantity: i64,
}

/// Create appointment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub salon_id: String,
    pub customer_id: String,
    pub branch_id: String,
    /// YYYY-MM-DD
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub services: Vec<ServiceLineInput>,
    #[serde(default)]
    pub products: Vec<ProductLineInput>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Payment method for the product order created alongside, when any
    pub payment_method: Option<String>,
}

/// Update appointment payload — supplied line arrays are re-priced, absent
/// fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub customer_id: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub services: Option<Vec<ServiceLineInput>>,
    pub products: Option<Vec<ProductLineInput>>,
    pub notes: Option<String>,
}

/// Patch payload — direct status assignment, no re-pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatusPatch {
    pub status: Option<AppointmentStatus>,
    pub payment_status: Option<PaymentStatus>,
}
