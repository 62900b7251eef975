//! Payment Repository
//!
//! Settlement records are created once and never mutated afterwards.

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::Payment;

const TABLE: &str = "payment";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, payment: Payment) -> RepoResult<Payment> {
        self.base.create_and_fetch(TABLE, payment).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        self.base.fetch(TABLE, id).await
    }

    pub async fn find_all(&self, salon_id: &str) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM payment WHERE salon = $salon ORDER BY created_at DESC")
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// The settling payment of an appointment, if any (1:1 in the current
    /// design)
    pub async fn find_by_appointment(&self, appointment_id: &str) -> RepoResult<Option<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM payment WHERE appointment = $appointment LIMIT 1")
            .bind(("appointment", qualify("appointment", appointment_id)))
            .await?
            .take(0)?;
        Ok(payments.into_iter().next())
    }
}
