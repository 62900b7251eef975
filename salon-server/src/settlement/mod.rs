//! Payment Settlement Engine
//!
//! Settles an appointment: derives sub-total from its lines, applies
//! coupon/tax/additional discount/tips, persists the payment, marks the
//! appointment paid, and renders the settlement invoice.

pub mod math;

use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::repository::{
    strip_table_prefix, AppointmentRepository, BranchRepository, CouponRepository,
    CustomerRepository, PaymentRepository, SalonRepository, ServiceRepository, TaxRepository,
};
use crate::invoicing::{InvoiceDocument, InvoiceLine, InvoiceService};
use crate::money::{to_decimal, to_f64};
use crate::orders::OrderService;
use crate::utils::{AppError, AppResult};
use shared::models::{Appointment, Coupon, Payment, PaymentCreate, PaymentStatus, Tax};

pub struct SettlementEngine {
    appointments: AppointmentRepository,
    payments: PaymentRepository,
    coupons: CouponRepository,
    taxes: TaxRepository,
    salons: SalonRepository,
    branches: BranchRepository,
    customers: CustomerRepository,
    services: ServiceRepository,
    orders: OrderService,
    invoices: InvoiceService,
}

impl SettlementEngine {
    pub fn new(db: Surreal<Db>, orders: OrderService, invoices: InvoiceService) -> Self {
        Self {
            appointments: AppointmentRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            coupons: CouponRepository::new(db.clone()),
            taxes: TaxRepository::new(db.clone()),
            salons: SalonRepository::new(db.clone()),
            branches: BranchRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            services: ServiceRepository::new(db),
            orders,
            invoices,
        }
    }

    /// Settle an appointment into a Payment record plus invoice URL.
    ///
    /// At most one settling payment per appointment: a second call is a
    /// conflict. Invalid/expired coupon or tax ids degrade to a 0
    /// contribution rather than failing the whole settlement.
    pub async fn settle(&self, req: PaymentCreate) -> AppResult<(Payment, String)> {
        let appointment = self
            .appointments
            .find_by_id(&req.appointment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Appointment {} not found", req.appointment_id))
            })?;
        let appointment_id = appointment.id.clone().unwrap_or_default();

        if self
            .payments
            .find_by_appointment(&appointment_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Appointment {} already settled",
                appointment_id
            )));
        }

        let service_amount: Decimal = appointment
            .services
            .iter()
            .map(|s| to_decimal(s.amount))
            .sum();
        let product_amount: Decimal = appointment
            .products
            .iter()
            .map(|p| to_decimal(p.total_price))
            .sum();
        let sub_total = service_amount + product_amount;

        let now = shared::util::now_millis();
        let coupon = self
            .load_coupon(&appointment.salon, req.coupon_id.as_deref())
            .await?;
        let tax = self.load_tax(&appointment.salon, req.tax_id.as_deref()).await?;

        let breakdown = math::compute(
            sub_total,
            coupon.as_ref(),
            tax.as_ref(),
            req.additional_discount,
            req.tips,
            now,
        )?;

        let payment = Payment {
            id: None,
            salon: appointment.salon.clone(),
            branch: appointment.branch.clone(),
            appointment: appointment_id.clone(),
            service_amount: to_f64(service_amount),
            product_amount: to_f64(product_amount),
            sub_total: to_f64(sub_total),
            coupon: coupon.as_ref().and_then(|c| c.id.clone()),
            coupon_discount: breakdown.coupon_discount,
            additional_discount: breakdown.additional_discount,
            tax: tax.as_ref().and_then(|t| t.id.clone()),
            tax_amount: breakdown.tax_amount,
            tips: breakdown.tips,
            final_total: breakdown.final_total,
            payment_method: req.payment_method,
            created_at: now,
        };

        let created = self.payments.create(payment).await?;
        self.appointments
            .set_payment_status(&appointment_id, PaymentStatus::Paid)
            .await?;

        let doc = self.invoice_document(&created, &appointment).await?;
        let payment_key = strip_table_prefix(
            "payment",
            created.id.as_deref().unwrap_or_default(),
        )
        .to_string();
        let url = self.invoices.render_and_store(&doc, &payment_key)?;

        tracing::info!(
            appointment = %appointment_id,
            payment = %payment_key,
            final_total = created.final_total,
            "Appointment settled"
        );

        Ok((created, url))
    }

    /// Tenant-scoped coupon load; a missing, empty, or cross-tenant id is
    /// treated as no coupon
    async fn load_coupon(
        &self,
        salon: &str,
        coupon_id: Option<&str>,
    ) -> AppResult<Option<Coupon>> {
        let Some(id) = clean_id(coupon_id) else {
            return Ok(None);
        };
        let coupon = self.coupons.find_by_id(id).await?;
        Ok(coupon.filter(|c| c.salon == salon))
    }

    /// Tenant-scoped tax load with the same leniency as coupons
    async fn load_tax(&self, salon: &str, tax_id: Option<&str>) -> AppResult<Option<Tax>> {
        let Some(id) = clean_id(tax_id) else {
            return Ok(None);
        };
        let tax = self.taxes.find_by_id(id).await?;
        Ok(tax.filter(|t| t.salon == salon))
    }

    /// Build the settlement invoice from persisted state: salon/branch
    /// header, customer block, itemized lines, financial breakdown
    async fn invoice_document(
        &self,
        payment: &Payment,
        appointment: &Appointment,
    ) -> AppResult<InvoiceDocument> {
        let salon = self.salons.find_by_id(&payment.salon).await?;
        let branch = self.branches.find_by_id(&payment.branch).await?;
        let customer = self.customers.find_by_id(&appointment.customer).await?;

        let mut lines = Vec::new();
        for service_line in &appointment.services {
            let name = self
                .services
                .find_by_id(&service_line.service)
                .await?
                .map(|s| s.name)
                .unwrap_or_else(|| "-".to_string());
            lines.push(InvoiceLine {
                name,
                quantity: 1,
                unit_price: service_line.amount,
                total_price: service_line.amount,
            });
        }
        for product_line in &appointment.products {
            let doc = self.orders.invoice_document_line_name(product_line).await?;
            lines.push(InvoiceLine {
                name: doc,
                quantity: product_line.quantity,
                unit_price: product_line.unit_price,
                total_price: product_line.total_price,
            });
        }

        let (salon_name, salon_addr, salon_phone, salon_email) = salon
            .map(|s| (s.salon_name, s.address, s.contact_number, s.contact_email))
            .unwrap_or_default();
        let (branch_name, branch_addr, branch_phone, branch_email) = branch
            .map(|b| (b.name, b.address, b.contact_number, b.contact_email))
            .unwrap_or_default();

        Ok(InvoiceDocument {
            title: "Payment Invoice".to_string(),
            reference: payment.id.clone().unwrap_or_default(),
            salon_name: dash_if_empty(salon_name),
            branch_name: dash_if_empty(branch_name),
            address: dash_opt(branch_addr.or(salon_addr)),
            phone: dash_opt(branch_phone.or(salon_phone)),
            email: dash_opt(branch_email.or(salon_email)),
            customer_name: customer
                .as_ref()
                .map(|c| c.full_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            customer_phone: dash_opt(customer.and_then(|c| c.phone_number)),
            payment_method: payment.payment_method.clone(),
            issued_at: payment.created_at,
            lines,
            summary: vec![
                ("Service Amount".to_string(), payment.service_amount),
                ("Product Amount".to_string(), payment.product_amount),
                ("Coupon Discount".to_string(), payment.coupon_discount),
                (
                    "Additional Discount".to_string(),
                    payment.additional_discount,
                ),
                ("Tax Amount".to_string(), payment.tax_amount),
                ("Tips".to_string(), payment.tips),
            ],
            total_label: "Final Total".to_string(),
            total: payment.final_total,
        })
    }
}

/// Empty-string ids arrive from older clients; treat them as absent
fn clean_id(id: Option<&str>) -> Option<&str> {
    id.filter(|v| !v.is_empty())
}

fn dash_if_empty(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

fn dash_opt(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-".to_string(),
    }
}
