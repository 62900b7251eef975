//! Product Model (catalog)
//!
//! Variants live in their own table rather than as an embedded array so a
//! variant stock decrement is a single conditional UPDATE on one document.

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    /// Branch references (String IDs)
    pub branches: Vec<String>,
    pub product_name: String,
    pub description: Option<String>,
    /// Base price, used when no variant is selected (default 0)
    pub price: Option<f64>,
    /// Product-level stock, used when no variant is selected
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub salon_id: String,
    pub branch_ids: Option<Vec<String>>,
    pub product_name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub branch_ids: Option<Vec<String>>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}

/// Product variant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    /// Product reference (String ID)
    pub product: String,
    /// Combination label, e.g. "250ml / Lavender"
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub is_active: bool,
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCreate {
    pub salon_id: String,
    pub product_id: String,
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

/// Update variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}
