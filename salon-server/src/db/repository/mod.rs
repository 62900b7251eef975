//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables. Each repository wraps the
//! shared database handle and exposes tenant-scoped queries; every read
//! projects `<string>id AS id` so record ids travel as plain `table:key`
//! strings end to end.

// Tenant + catalog
pub mod branch;
pub mod coupon;
pub mod customer;
pub mod product;
pub mod salon;
pub mod service;
pub mod staff;
pub mod tax;

// Entitlements
pub mod customer_package;

// Financial pipeline
pub mod appointment;
pub mod order;
pub mod payment;
pub mod revenue_commission;
pub mod staff_earning;
pub mod staff_payment;

// Re-exports
pub use appointment::AppointmentRepository;
pub use branch::BranchRepository;
pub use coupon::CouponRepository;
pub use customer::CustomerRepository;
pub use customer_package::CustomerPackageRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use revenue_commission::RevenueCommissionRepository;
pub use salon::SalonRepository;
pub use service::ServiceRepository;
pub use staff::StaffRepository;
pub use staff_earning::StaffEarningRepository;
pub use staff_payment::StaffPaymentRepository;
pub use tax::TaxRepository;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.to_lowercase().contains("already contains") || msg.to_lowercase().contains("unique")
        {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Minimal projection used to read back the id of a created record
#[derive(Debug, Deserialize)]
pub struct Record {
    pub id: RecordId,
}

/// Strip the `table:` prefix from an id, if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    }
}

/// Normalize an id to the `table:key` form used for stored references
pub fn qualify(table: &str, id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{}:{}", table, id)
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Fetch one record by `table:key` id with a string-projected id
    pub async fn fetch<T>(&self, table: &str, id: &str) -> RepoResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let key = strip_table_prefix(table, id).to_string();
        let mut result = self
            .db
            .query("SELECT *, <string>id AS id FROM type::thing($tb, $key)")
            .bind(("tb", table.to_string()))
            .bind(("key", key))
            .await?;
        let rows: Vec<T> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create a record from `content` and read it back in full
    pub async fn create_and_fetch<T, C>(&self, table: &str, content: C) -> RepoResult<T>
    where
        T: serde::de::DeserializeOwned,
        C: serde::Serialize + 'static,
    {
        let created: Option<Record> = self.db.create(table).content(content).await?;
        let record =
            created.ok_or_else(|| RepoError::Database(format!("Failed to create {}", table)))?;
        self.fetch(table, &record.id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database(format!("Created {} not readable", table)))
    }

    /// Merge `data` into a record and read it back in full.
    ///
    /// `None` fields of update payloads are stripped before the MERGE so an
    /// absent field leaves the stored value untouched.
    pub async fn merge_and_fetch<T, D>(&self, table: &str, id: &str, data: D) -> RepoResult<T>
    where
        T: serde::de::DeserializeOwned,
        D: serde::Serialize,
    {
        let mut value =
            serde_json::to_value(data).map_err(|e| RepoError::Validation(e.to_string()))?;
        if let serde_json::Value::Object(ref mut map) = value {
            map.retain(|_, v| !v.is_null());
        }
        let key = strip_table_prefix(table, id).to_string();
        self.db
            .query("UPDATE type::thing($tb, $key) MERGE $data")
            .bind(("tb", table.to_string()))
            .bind(("key", key))
            .bind(("data", value))
            .await?;
        self.fetch(table, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{} {} not found", table, id)))
    }

    /// Delete a record, reporting whether it existed
    pub async fn delete(&self, table: &str, id: &str) -> RepoResult<bool> {
        let existing: Option<serde_json::Value> = self.fetch(table, id).await?;
        if existing.is_none() {
            return Ok(false);
        }
        let key = strip_table_prefix(table, id).to_string();
        self.db
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", table.to_string()))
            .bind(("key", key))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("service", "service:abc"), "abc");
        assert_eq!(strip_table_prefix("service", "abc"), "abc");
        // Foreign prefix stays untouched
        assert_eq!(strip_table_prefix("service", "staff:abc"), "staff:abc");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("service", "abc"), "service:abc");
        assert_eq!(qualify("service", "service:abc"), "service:abc");
    }
}
