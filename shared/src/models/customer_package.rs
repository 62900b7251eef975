//! Customer Package Model (entitlement ledger)
//!
//! A purchased package grants quantity-limited rights to services. The
//! package document keeps the descriptive copy; the consumable quantities
//! are normalized into `package_entitlement` rows so the booking engine's
//! decrement-if-quantity>0 touches exactly one document.

use serde::{Deserialize, Serialize};

/// Customer package entity — descriptive header of a purchased package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub customer: String,
    pub package_name: Option<String>,
    pub description: Option<String>,
    pub package_price: Option<f64>,
    /// Unix millis
    pub start_date: i64,
    /// Unix millis; the package is usable while `end_date >= now`
    pub end_date: i64,
    /// Display copy of the purchased line-up (quantities as sold, not live)
    pub package_details: Vec<PackageDetail>,
    pub created_at: i64,
}

/// One purchased service line inside a package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDetail {
    pub service: String,
    pub discounted_price: Option<f64>,
    pub quantity: i64,
}

/// Entitlement row — the live remaining-use counter for one service.
///
/// Invariant: `quantity >= 0` always; consumption is a conditional
/// decrement keyed by this row's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageEntitlement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salon: String,
    pub customer: String,
    /// Owning package reference
    pub package: String,
    pub service: String,
    pub discounted_price: Option<f64>,
    pub quantity: i64,
    /// Copied from the package for single-document eligibility checks
    pub end_date: i64,
}

/// Create customer package payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPackageCreate {
    pub salon_id: String,
    pub customer_id: String,
    pub package_name: Option<String>,
    pub description: Option<String>,
    pub package_price: Option<f64>,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    pub package_details: Vec<PackageDetail>,
}

/// Update customer package payload (descriptive fields only — entitlement
/// quantities change only through booking consumption)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPackageUpdate {
    pub package_name: Option<String>,
    pub description: Option<String>,
    pub package_price: Option<f64>,
    pub end_date: Option<String>,
}
