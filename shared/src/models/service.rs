//! Service Model (catalog)

use serde::{Deserialize, Serialize};

/// Service entity — a bookable treatment with a catalog price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub name: String,
    /// Duration in minutes
    pub service_duration: i32,
    /// Walk-in price, the amount charged when no package covers the booking
    pub regular_price: f64,
    pub members_price: Option<f64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub salon_id: String,
    pub name: String,
    pub service_duration: i32,
    pub regular_price: f64,
    pub members_price: Option<f64>,
    pub description: Option<String>,
}

/// Update service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub service_duration: Option<i32>,
    pub regular_price: Option<f64>,
    pub members_price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
