//! Customer Package Repository (entitlement ledger)
//!
//! The package header document carries the descriptive copy; each
//! consumable service quantity is its own `package_entitlement` row.
//! Consumption is a decrement-if-quantity>0 on one row, so two concurrent
//! bookings cannot both spend the last unit.

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{qualify, strip_table_prefix, BaseRepository, RepoResult};
use shared::models::{CustomerPackage, CustomerPackageCreate, PackageEntitlement};

const TABLE: &str = "customer_package";
const ENTITLEMENT_TABLE: &str = "package_entitlement";

/// Result of a successful entitlement consumption
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumedEntitlement {
    pub entitlement_id: String,
    pub package_id: String,
    pub discounted_price: Option<f64>,
}

#[derive(Clone)]
pub struct CustomerPackageRepository {
    base: BaseRepository,
}

impl CustomerPackageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        salon_id: &str,
        customer_id: Option<&str>,
    ) -> RepoResult<Vec<CustomerPackage>> {
        let mut query = String::from(
            "SELECT *, <string>id AS id FROM customer_package WHERE salon = $salon",
        );
        if customer_id.is_some() {
            query.push_str(" AND customer = $customer");
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("salon", qualify("salon", salon_id)));
        if let Some(customer) = customer_id {
            q = q.bind(("customer", qualify("customer", customer)));
        }
        let packages: Vec<CustomerPackage> = q.await?.take(0)?;
        Ok(packages)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CustomerPackage>> {
        self.base.fetch(TABLE, id).await
    }

    /// Create the package header and one entitlement row per purchased
    /// service line.
    pub async fn create(
        &self,
        data: CustomerPackageCreate,
        start_date: i64,
        end_date: i64,
    ) -> RepoResult<CustomerPackage> {
        let package = CustomerPackage {
            id: None,
            salon: qualify("salon", &data.salon_id),
            customer: qualify("customer", &data.customer_id),
            package_name: data.package_name,
            description: data.description,
            package_price: data.package_price,
            start_date,
            end_date,
            package_details: data
                .package_details
                .iter()
                .map(|d| shared::models::PackageDetail {
                    service: qualify("service", &d.service),
                    discounted_price: d.discounted_price,
                    quantity: d.quantity,
                })
                .collect(),
            created_at: shared::util::now_millis(),
        };

        let created: CustomerPackage = self.base.create_and_fetch(TABLE, package).await?;
        let package_id = created.id.clone().unwrap_or_default();

        for detail in &created.package_details {
            let entitlement = PackageEntitlement {
                id: None,
                salon: created.salon.clone(),
                customer: created.customer.clone(),
                package: package_id.clone(),
                service: detail.service.clone(),
                discounted_price: detail.discounted_price,
                quantity: detail.quantity,
                end_date,
            };
            let _: PackageEntitlement = self
                .base
                .create_and_fetch(ENTITLEMENT_TABLE, entitlement)
                .await?;
        }

        Ok(created)
    }

    /// Merge descriptive fields; an end_date change propagates to the
    /// entitlement rows so eligibility stays a single-document check.
    pub async fn update_descriptive(
        &self,
        id: &str,
        data: shared::models::CustomerPackageUpdate,
        end_date: Option<i64>,
    ) -> RepoResult<CustomerPackage> {
        #[derive(serde::Serialize)]
        struct Merge {
            package_name: Option<String>,
            description: Option<String>,
            package_price: Option<f64>,
            end_date: Option<i64>,
        }
        let merge = Merge {
            package_name: data.package_name,
            description: data.description,
            package_price: data.package_price,
            end_date,
        };
        let updated: CustomerPackage = self.base.merge_and_fetch(TABLE, id, merge).await?;

        if let Some(end) = end_date {
            self.base
                .db()
                .query("UPDATE package_entitlement SET end_date = $end WHERE package = $package")
                .bind(("end", end))
                .bind(("package", qualify(TABLE, id)))
                .await?;
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE package_entitlement WHERE package = $package")
            .bind(("package", qualify(TABLE, id)))
            .await?;
        self.base.delete(TABLE, id).await
    }

    /// Remaining entitlements of a package
    pub async fn entitlements(&self, package_id: &str) -> RepoResult<Vec<PackageEntitlement>> {
        let rows: Vec<PackageEntitlement> = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM package_entitlement WHERE package = $package")
            .bind(("package", qualify(TABLE, package_id)))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Consume one unit of an active entitlement for `service`.
    ///
    /// Candidates are re-checked by the conditional decrement itself, so a
    /// concurrent booking that spent the last unit first simply moves us to
    /// the next candidate (or to walk-in pricing).
    pub async fn consume_entitlement(
        &self,
        salon_id: &str,
        customer_id: &str,
        service_id: &str,
        now: i64,
    ) -> RepoResult<Option<ConsumedEntitlement>> {
        let candidates: Vec<PackageEntitlement> = self
            .base
            .db()
            .query(
                "SELECT *, <string>id AS id FROM package_entitlement \
                 WHERE salon = $salon AND customer = $customer AND service = $service \
                 AND quantity > 0 AND end_date >= $now \
                 ORDER BY end_date ASC",
            )
            .bind(("salon", qualify("salon", salon_id)))
            .bind(("customer", qualify("customer", customer_id)))
            .bind(("service", qualify("service", service_id)))
            .bind(("now", now))
            .await?
            .take(0)?;

        for candidate in candidates {
            let Some(id) = candidate.id.clone() else {
                continue;
            };
            let key = strip_table_prefix(ENTITLEMENT_TABLE, &id).to_string();
            let updated: Vec<i64> = self
                .base
                .db()
                .query(
                    "UPDATE type::thing($tb, $key) SET quantity -= 1 \
                     WHERE quantity > 0 AND end_date >= $now \
                     RETURN VALUE quantity",
                )
                .bind(("tb", ENTITLEMENT_TABLE.to_string()))
                .bind(("key", key))
                .bind(("now", now))
                .await?
                .take(0)?;

            if !updated.is_empty() {
                return Ok(Some(ConsumedEntitlement {
                    entitlement_id: id,
                    package_id: candidate.package,
                    discounted_price: candidate.discounted_price,
                }));
            }
        }

        Ok(None)
    }
}
