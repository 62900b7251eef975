//! Coupon Model

use serde::{Deserialize, Serialize};

/// Discount semantics shared by coupons and taxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    Fixed,
}

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branches: Vec<String>,
    pub name: String,
    pub description: Option<String>,
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    /// Unix millis — valid window start (inclusive)
    pub start_date: i64,
    /// Unix millis — valid window end (inclusive)
    pub end_date: i64,
    pub use_limit: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub salon_id: String,
    pub branch_ids: Option<Vec<String>>,
    pub name: String,
    pub description: Option<String>,
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    pub use_limit: Option<i64>,
}

/// Update coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_amount: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub use_limit: Option<i64>,
    pub is_active: Option<bool>,
}
