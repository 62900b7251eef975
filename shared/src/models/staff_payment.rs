//! Staff Payment Model (payout ledger)

use serde::{Deserialize, Serialize};

/// Staff payment entity — append-only record of an executed payout.
///
/// The system of record for what has actually been paid to staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub staff: String,
    pub total_paid: f64,
    pub payment_method: String,
    pub description: Option<String>,
    pub tips: f64,
    pub commission_amount: f64,
    pub paid_at: i64,
}

/// Payout request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPayoutRequest {
    pub salon_id: String,
    pub payment_method: String,
    pub description: Option<String>,
}
