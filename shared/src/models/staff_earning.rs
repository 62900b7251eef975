//! Staff Earning Model (working aggregate)

use serde::{Deserialize, Serialize};

/// Staff earning aggregate, keyed by staff+salon.
///
/// A system-computed cache, not a ledger of record: recomputed on each
/// aggregation pass and deleted once a payout is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEarning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub staff: String,
    pub total_booking: i64,
    pub service_amount: f64,
    pub commission_earning: f64,
    pub tip_earning: f64,
    /// commission_earning + tip_earning
    pub staff_earning: f64,
    pub updated_at: i64,
}

/// Per-staff earnings view returned by the aggregation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEarningView {
    pub staff_id: String,
    pub staff_name: String,
    pub total_booking: i64,
    pub service_amount: f64,
    pub commission_earning: f64,
    pub tip_earning: f64,
    pub staff_earning: f64,
}
