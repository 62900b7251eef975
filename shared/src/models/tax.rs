//! Tax Model

use serde::{Deserialize, Serialize};

use super::coupon::DiscountType;

/// Tax entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tax {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branches: Vec<String>,
    pub title: String,
    /// Percent value or flat amount depending on `tax_type`
    pub value: f64,
    pub tax_type: DiscountType,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create tax payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCreate {
    pub salon_id: String,
    pub branch_ids: Option<Vec<String>>,
    pub title: String,
    pub value: f64,
    pub tax_type: DiscountType,
}

/// Update tax payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxUpdate {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub tax_type: Option<DiscountType>,
    pub is_active: Option<bool>,
}
