//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity — a physical location of a salon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tenant reference (String ID, required)
    pub salon: String,
    pub name: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub salon_id: String,
    pub name: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
}

/// Update branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}
