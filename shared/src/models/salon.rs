//! Salon Model (tenant root)

use serde::{Deserialize, Serialize};

/// Salon entity — the tenant. Every other entity carries a `salon` ref.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon_name: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create salon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonCreate {
    pub salon_name: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
}

/// Update salon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonUpdate {
    pub salon_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}
