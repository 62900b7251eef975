//! Booking Engine
//!
//! Creates and updates appointments: resolves per-service pricing (package
//! covered vs. walk-in), per-product pricing and stock, computes totals,
//! and triggers order + invoice creation when products are involved.

pub mod pricing;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::repository::{
    qualify, AppointmentRepository, CustomerPackageRepository, ProductRepository,
    ServiceRepository,
};
use crate::db::repository::appointment::AppointmentMerge;
use crate::orders::OrderService;
use crate::utils::{time, AppError, AppResult};
use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatusPatch, AppointmentUpdate, PaymentMethod,
    ProductLine, ProductLineInput, ServiceLine, ServiceLineInput,
};

/// Booking engine — the write path of the appointment aggregate
pub struct BookingEngine {
    services: ServiceRepository,
    products: ProductRepository,
    packages: CustomerPackageRepository,
    appointments: AppointmentRepository,
    orders: OrderService,
}

impl BookingEngine {
    pub fn new(db: Surreal<Db>, orders: OrderService) -> Self {
        Self {
            services: ServiceRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            packages: CustomerPackageRepository::new(db.clone()),
            appointments: AppointmentRepository::new(db),
            orders,
        }
    }

    /// Create an appointment, consuming package entitlements where they
    /// cover a booked service. When product lines exist, a stock-deducting
    /// order with a PDF invoice is created synchronously.
    pub async fn create(&self, req: AppointmentCreate) -> AppResult<Appointment> {
        let salon = qualify("salon", &req.salon_id);
        let customer = qualify("customer", &req.customer_id);
        let branch = qualify("branch", &req.branch_id);

        let date = time::parse_date(&req.appointment_date)?;
        let appointment_date = time::day_start_millis(date);

        let services = self
            .resolve_service_lines(&req.salon_id, &req.customer_id, &req.services)
            .await?;
        let products = self
            .resolve_product_lines(&req.salon_id, &req.products)
            .await?;

        let (service_total, product_total, total_payment) =
            pricing::sum_totals(&services, &products)?;

        let appointment = Appointment {
            id: None,
            salon: salon.clone(),
            customer: customer.clone(),
            branch: branch.clone(),
            appointment_date,
            appointment_time: req.appointment_time,
            services,
            products: products.clone(),
            notes: req.notes,
            status: req.status.unwrap_or_default(),
            payment_status: req.payment_status.unwrap_or_default(),
            service_total,
            product_total,
            total_payment,
            order_code: shared::util::appointment_order_code(),
            created_at: shared::util::now_millis(),
        };

        let created = self.appointments.create(appointment).await?;

        // Product purchases spawn an order with its own invoice, then the
        // sold stock comes off the shelf (floored at zero — the sale has
        // already happened).
        if !products.is_empty() {
            let payment_method = parse_payment_method(req.payment_method.as_deref());
            self.orders
                .create_for_booking(&salon, &branch, &customer, &products, payment_method)
                .await?;
        }

        Ok(created)
    }

    /// Re-price supplied line arrays and merge; untouched fields survive.
    pub async fn update(&self, id: &str, req: AppointmentUpdate) -> AppResult<Appointment> {
        let existing = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;

        let customer_id = req
            .customer_id
            .clone()
            .unwrap_or_else(|| existing.customer.clone());

        let services = match &req.services {
            Some(inputs) => Some(
                self.resolve_service_lines(&existing.salon, &customer_id, inputs)
                    .await?,
            ),
            None => None,
        };
        let products = match &req.products {
            Some(inputs) => Some(
                self.resolve_product_lines(&existing.salon, inputs)
                    .await?,
            ),
            None => None,
        };

        // Totals always reflect the merged aggregate, not just the fields
        // supplied in this request
        let effective_services = services.as_deref().unwrap_or(&existing.services);
        let effective_products = products.as_deref().unwrap_or(&existing.products);
        let (service_total, product_total, total_payment) =
            pricing::sum_totals(effective_services, effective_products)?;

        let appointment_date = match &req.appointment_date {
            Some(d) => Some(time::day_start_millis(time::parse_date(d)?)),
            None => None,
        };

        let merge = AppointmentMerge {
            customer: req.customer_id.map(|c| qualify("customer", &c)),
            appointment_date,
            appointment_time: req.appointment_time,
            services,
            products,
            notes: req.notes,
            service_total: Some(service_total),
            product_total: Some(product_total),
            total_payment: Some(total_payment),
        };

        Ok(self.appointments.merge(id, merge).await?)
    }

    /// Direct status assignment; at least one of the two fields is required
    pub async fn patch_status(
        &self,
        id: &str,
        patch: AppointmentStatusPatch,
    ) -> AppResult<Appointment> {
        if patch.status.is_none() && patch.payment_status.is_none() {
            return Err(AppError::invalid(
                "At least one field (status or payment_status) is required",
            ));
        }
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;
        Ok(self
            .appointments
            .patch_status(id, patch.status, patch.payment_status)
            .await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        match self.appointments.delete(id).await? {
            true => Ok(()),
            false => Err(AppError::not_found(format!("Appointment {} not found", id))),
        }
    }

    /// Resolve requested service lines: an active entitlement covers the
    /// booking (amount 0, quantity consumed atomically), otherwise the
    /// catalog's regular price applies.
    async fn resolve_service_lines(
        &self,
        salon_id: &str,
        customer_id: &str,
        inputs: &[ServiceLineInput],
    ) -> AppResult<Vec<ServiceLine>> {
        let now = shared::util::now_millis();
        let mut lines = Vec::with_capacity(inputs.len());

        for input in inputs {
            let service_ref = qualify("service", &input.service_id);
            let staff_ref = qualify("staff", &input.staff_id);

            let consumed = self
                .packages
                .consume_entitlement(salon_id, customer_id, &input.service_id, now)
                .await?;

            match consumed {
                Some(entitlement) => {
                    tracing::debug!(
                        service = %service_ref,
                        package = %entitlement.package_id,
                        "Package entitlement consumed"
                    );
                    lines.push(pricing::package_service_line(
                        &service_ref,
                        &staff_ref,
                        &entitlement.package_id,
                    ));
                }
                None => {
                    let service = self
                        .services
                        .find_in_salon(salon_id, &input.service_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::not_found(format!("Service {} not found", input.service_id))
                        })?;
                    lines.push(pricing::paid_service_line(
                        &service_ref,
                        &staff_ref,
                        service.regular_price,
                    )?);
                }
            }
        }

        Ok(lines)
    }

    /// Resolve requested product lines against the catalog
    async fn resolve_product_lines(
        &self,
        salon_id: &str,
        inputs: &[ProductLineInput],
    ) -> AppResult<Vec<ProductLine>> {
        let mut lines = Vec::with_capacity(inputs.len());

        for input in inputs {
            let product = self
                .products
                .find_in_salon(salon_id, &input.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Product {} not found", input.product_id))
                })?;

            let variant = match &input.variant_id {
                Some(variant_id) => Some(
                    self.products
                        .find_variant_of(&input.product_id, variant_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::not_found(format!("Variant {} not found", variant_id))
                        })?,
                ),
                None => None,
            };

            lines.push(pricing::price_product_line(
                &product,
                variant.as_ref(),
                input.quantity,
            )?);
        }

        Ok(lines)
    }
}

/// Order payment methods accepted on the booking payload; anything else
/// falls back to cash
fn parse_payment_method(raw: Option<&str>) -> PaymentMethod {
    match raw {
        Some("card") => PaymentMethod::Card,
        Some("upi") => PaymentMethod::Upi,
        _ => PaymentMethod::Cash,
    }
}
