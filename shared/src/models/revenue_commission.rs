//! Revenue Commission Model
//!
//! A commission rule maps service-amount ranges to a commission value. The
//! slot list is ordered and must be non-overlapping — validated when the
//! rule is written, not assumed when it is read.

use serde::{Deserialize, Serialize};

/// How slot amounts are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionType {
    Percentage,
    Fixed,
}

/// One amount range mapped to a commission value.
///
/// `slot` is a "min-max" range string, both bounds inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionSlot {
    pub slot: String,
    pub amount: f64,
}

/// Revenue commission entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueCommission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branch: String,
    pub commission_name: String,
    pub commission_type: CommissionType,
    pub commission: Vec<CommissionSlot>,
    pub created_at: i64,
}

/// Create revenue commission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueCommissionCreate {
    pub salon_id: String,
    pub branch_id: String,
    pub commission_name: String,
    pub commission_type: CommissionType,
    pub commission: Vec<CommissionSlot>,
}

/// Update revenue commission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueCommissionUpdate {
    pub commission_name: Option<String>,
    pub commission_type: Option<CommissionType>,
    pub commission: Option<Vec<CommissionSlot>>,
}
