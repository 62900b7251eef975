//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branch: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    /// Service references this staff member can perform
    pub services: Vec<String>,
    /// Assigned revenue commission rule (single field — the legacy
    /// assigned/fallback pair was collapsed during migration)
    pub commission: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub salon_id: String,
    pub branch_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub service_ids: Option<Vec<String>>,
    pub commission_id: Option<String>,
}

/// Update staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub branch_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub service_ids: Option<Vec<String>>,
    pub commission_id: Option<String>,
    pub is_active: Option<bool>,
}
