//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) initialization and schema bootstrap.

pub mod repository;

use std::path::Path;

use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "salon";
const DATABASE: &str = "salon";

/// Index definitions applied at startup. All statements are idempotent.
const SCHEMA: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS appointment_salon ON TABLE appointment FIELDS salon",
    "DEFINE INDEX IF NOT EXISTS appointment_order_code ON TABLE appointment FIELDS order_code UNIQUE",
    "DEFINE INDEX IF NOT EXISTS order_salon ON TABLE order FIELDS salon",
    "DEFINE INDEX IF NOT EXISTS order_order_code ON TABLE order FIELDS order_code UNIQUE",
    "DEFINE INDEX IF NOT EXISTS payment_salon ON TABLE payment FIELDS salon",
    "DEFINE INDEX IF NOT EXISTS payment_appointment ON TABLE payment FIELDS appointment",
    "DEFINE INDEX IF NOT EXISTS entitlement_lookup ON TABLE package_entitlement FIELDS salon, customer, service",
    "DEFINE INDEX IF NOT EXISTS staff_earning_staff ON TABLE staff_earning FIELDS salon, staff UNIQUE",
    "DEFINE INDEX IF NOT EXISTS coupon_code ON TABLE coupon FIELDS salon, coupon_code UNIQUE",
];

/// Open the embedded database and apply schema definitions
pub async fn init(db_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(db_dir)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    bootstrap_schema(&db).await?;

    tracing::info!("Database connection established (SurrealDB RocksDB)");
    Ok(db)
}

/// Apply index definitions. Shared with in-memory test databases.
pub async fn bootstrap_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    for stmt in SCHEMA {
        db.query(*stmt)
            .await
            .map_err(|e| AppError::database(format!("Schema bootstrap failed: {e}")))?;
    }
    tracing::debug!("Schema definitions applied");
    Ok(())
}
