//! Order Model (product purchase)

use serde::{Deserialize, Serialize};

/// Accepted payment methods for product orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

/// One order line. `total_price` is immutable once stock was deducted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: String,
    pub variant: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub branch: String,
    pub customer: String,
    pub products: Vec<OrderLine>,
    /// Sum of line totals
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub order_code: String,
    pub invoice_pdf_url: Option<String>,
    pub created_at: i64,
}

/// Requested order line (pricing resolved against the catalog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub salon_id: String,
    pub branch_id: String,
    pub customer_id: String,
    pub products: Vec<OrderLineInput>,
    pub payment_method: PaymentMethod,
}
