//! Appointment Repository
//!
//! Service/product lines are value collections owned by the appointment
//! document. Writes always go through whole-aggregate merges so the totals
//! invariant is never bypassed by a stray field edit.

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, BaseRepository, RepoResult};
use shared::models::{
    Appointment, AppointmentStatus, PaymentStatus, ProductLine, ServiceLine,
};

const TABLE: &str = "appointment";

/// Re-priced fields merged on update; absent fields stay untouched
#[derive(Debug, Default, Serialize)]
pub struct AppointmentMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_payment: Option<f64>,
}

#[derive(Clone)]
pub struct AppointmentRepository {
    base: BaseRepository,
}

impl AppointmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, appointment: Appointment) -> RepoResult<Appointment> {
        self.base.create_and_fetch(TABLE, appointment).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Appointment>> {
        self.base.fetch(TABLE, id).await
    }

    /// All appointments of a salon, optionally restricted to a
    /// `[start, end)` millis window on the appointment date
    pub async fn find_all(
        &self,
        salon_id: &str,
        date_range: Option<(i64, i64)>,
    ) -> RepoResult<Vec<Appointment>> {
        let mut query = String::from(
            "SELECT *, <string>id AS id FROM appointment WHERE salon = $salon",
        );
        if date_range.is_some() {
            query.push_str(" AND appointment_date >= $start AND appointment_date < $end");
        }
        query.push_str(" ORDER BY appointment_date DESC");

        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("salon", qualify("salon", salon_id)));
        if let Some((start, end)) = date_range {
            q = q.bind(("start", start)).bind(("end", end));
        }
        let appointments: Vec<Appointment> = q.await?.take(0)?;
        Ok(appointments)
    }

    /// Checked-out appointments of a salon — the earnings base set
    pub async fn find_checked_out(&self, salon_id: &str) -> RepoResult<Vec<Appointment>> {
        let appointments: Vec<Appointment> = self
            .base
            .db()
            .query(
                "SELECT *, <string>id AS id FROM appointment \
                 WHERE salon = $salon AND status = 'check-out' \
                 ORDER BY appointment_date ASC",
            )
            .bind(("salon", qualify("salon", salon_id)))
            .await?
            .take(0)?;
        Ok(appointments)
    }

    pub async fn merge(&self, id: &str, data: AppointmentMerge) -> RepoResult<Appointment> {
        self.base.merge_and_fetch(TABLE, id, data).await
    }

    /// Direct status assignment, no re-pricing
    pub async fn patch_status(
        &self,
        id: &str,
        status: Option<AppointmentStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> RepoResult<Appointment> {
        #[derive(Serialize)]
        struct Patch {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<AppointmentStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_status: Option<PaymentStatus>,
        }
        self.base
            .merge_and_fetch(
                TABLE,
                id,
                Patch {
                    status,
                    payment_status,
                },
            )
            .await
    }

    pub async fn set_payment_status(
        &self,
        id: &str,
        payment_status: PaymentStatus,
    ) -> RepoResult<Appointment> {
        self.patch_status(id, None, Some(payment_status)).await
    }

    /// Rewrite the services array of one appointment (aggregate-level
    /// update used by the payout path to flip `paid` flags)
    pub async fn replace_services(
        &self,
        id: &str,
        services: Vec<ServiceLine>,
    ) -> RepoResult<Appointment> {
        #[derive(Serialize)]
        struct Patch {
            services: Vec<ServiceLine>,
        }
        self.base.merge_and_fetch(TABLE, id, Patch { services }).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete(TABLE, id).await
    }
}
