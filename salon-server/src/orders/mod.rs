//! Order & Invoice Generator
//!
//! Converts a set of product lines into a stock-deducting order with a PDF
//! invoice. Stock is claimed line by line with conditional decrements; a
//! failure part-way restores every already-claimed line before the error
//! surfaces, so stock can never go missing without a matching order.

use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::booking::pricing;
use crate::db::repository::{
    qualify, BranchRepository, CustomerRepository, OrderRepository, ProductRepository,
    SalonRepository,
};
use crate::invoicing::{InvoiceDocument, InvoiceLine, InvoiceService};
use crate::money::{to_decimal, to_f64};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Order, OrderCreate, OrderLine, OrderLineInput, PaymentMethod, ProductLine,
};

/// One stock claim made while building an order, kept for compensation
struct StockClaim {
    table: &'static str,
    id: String,
    quantity: i64,
}

pub struct OrderService {
    products: ProductRepository,
    orders: OrderRepository,
    salons: SalonRepository,
    branches: BranchRepository,
    customers: CustomerRepository,
    invoices: InvoiceService,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, invoices: InvoiceService) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            salons: SalonRepository::new(db.clone()),
            branches: BranchRepository::new(db.clone()),
            customers: CustomerRepository::new(db),
            invoices,
        }
    }

    /// Create an order from requested lines: re-validate against current
    /// catalog state, claim stock, persist, render the invoice.
    pub async fn create(&self, req: OrderCreate) -> AppResult<Order> {
        if req.products.is_empty() {
            return Err(AppError::invalid("products array is empty"));
        }

        let mut lines: Vec<OrderLine> = Vec::with_capacity(req.products.len());
        let mut claims: Vec<StockClaim> = Vec::new();

        for input in &req.products {
            match self.resolve_and_claim(&req.salon_id, input, &mut claims).await {
                Ok(line) => lines.push(line),
                Err(e) => {
                    self.release_claims(&claims).await;
                    return Err(e);
                }
            }
        }

        let order = self.build_order(
            &qualify("salon", &req.salon_id),
            &qualify("branch", &req.branch_id),
            &qualify("customer", &req.customer_id),
            lines,
            req.payment_method,
        );

        let created = match self.orders.create(order).await {
            Ok(created) => created,
            Err(e) => {
                // Claimed stock must not stay short without an order
                self.release_claims(&claims).await;
                return Err(e.into());
            }
        };

        self.attach_invoice(created).await
    }

    /// Order creation on the booking path: lines are already priced and the
    /// sale is committed, so stock comes off with a floor at zero instead
    /// of an availability check.
    pub async fn create_for_booking(
        &self,
        salon: &str,
        branch: &str,
        customer: &str,
        lines: &[ProductLine],
        payment_method: PaymentMethod,
    ) -> AppResult<Order> {
        let order_lines: Vec<OrderLine> = lines
            .iter()
            .map(|l| OrderLine {
                product: l.product.clone(),
                variant: l.variant.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                total_price: l.total_price,
            })
            .collect();

        let order = self.build_order(salon, branch, customer, order_lines, payment_method);
        let created = self.orders.create(order).await?;
        let created = self.attach_invoice(created).await?;

        for line in lines {
            let (table, id) = stock_target(line.variant.as_deref(), &line.product);
            self.products
                .deduct_stock_floor(table, id, line.quantity)
                .await?;
        }

        Ok(created)
    }

    /// Re-price an order's lines against the current catalog (no stock
    /// movement) and regenerate its invoice
    pub async fn reprice(&self, id: &str, inputs: Vec<OrderLineInput>) -> AppResult<Order> {
        let existing = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

        let mut lines: Vec<OrderLine> = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let line = self.resolve_line(&existing.salon, input).await?;
            lines.push(line);
        }
        let total_price = lines_total(&lines);

        let updated = self.orders.replace_lines(id, lines, total_price).await?;
        self.attach_invoice(updated).await
    }

    /// Build the invoice document for an order from persisted state
    pub async fn invoice_document(&self, order: &Order) -> AppResult<InvoiceDocument> {
        let salon = self.salons.find_by_id(&order.salon).await?;
        let branch = self.branches.find_by_id(&order.branch).await?;
        let customer = self.customers.find_by_id(&order.customer).await?;

        let mut lines = Vec::with_capacity(order.products.len());
        for line in &order.products {
            let name = self.line_name(&line.product, line.variant.as_deref()).await?;
            lines.push(InvoiceLine {
                name,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price,
            });
        }

        let (salon_name, salon_addr, salon_phone, salon_email) = salon
            .map(|s| (s.salon_name, s.address, s.contact_number, s.contact_email))
            .unwrap_or_default();
        let branch = branch.map(|b| (b.name, b.address, b.contact_number, b.contact_email));
        let (branch_name, branch_addr, branch_phone, branch_email) =
            branch.unwrap_or_default();

        Ok(InvoiceDocument {
            title: "Invoice".to_string(),
            reference: order.order_code.clone(),
            salon_name: or_dash(Some(salon_name)),
            branch_name: or_dash(Some(branch_name)),
            address: or_dash(branch_addr.or(salon_addr)),
            phone: or_dash(branch_phone.or(salon_phone)),
            email: or_dash(branch_email.or(salon_email)),
            customer_name: customer
                .as_ref()
                .map(|c| c.full_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            customer_phone: or_dash(customer.and_then(|c| c.phone_number)),
            payment_method: method_str(order.payment_method).to_string(),
            issued_at: order.created_at,
            lines,
            summary: vec![("Subtotal".to_string(), order.total_price)],
            total_label: "Total Payable".to_string(),
            total: order.total_price,
        })
    }

    /// Display name of a stored line: product name plus variant label
    async fn line_name(&self, product: &str, variant: Option<&str>) -> AppResult<String> {
        let mut name = self
            .products
            .find_by_id(product)
            .await?
            .map(|p| p.product_name)
            .unwrap_or_else(|| "-".to_string());
        if let Some(variant_id) = variant
            && let Some(variant) = self.products.find_variant(variant_id).await?
        {
            name = format!("{} ({})", name, variant.name);
        }
        Ok(name)
    }

    /// Display name for an appointment's product line, used by the
    /// settlement invoice
    pub async fn invoice_document_line_name(&self, line: &ProductLine) -> AppResult<String> {
        self.line_name(&line.product, line.variant.as_deref()).await
    }

    fn build_order(
        &self,
        salon: &str,
        branch: &str,
        customer: &str,
        lines: Vec<OrderLine>,
        payment_method: PaymentMethod,
    ) -> Order {
        let total_price = lines_total(&lines);
        Order {
            id: None,
            salon: salon.to_string(),
            branch: branch.to_string(),
            customer: customer.to_string(),
            products: lines,
            total_price,
            payment_method,
            order_code: shared::util::order_code(),
            invoice_pdf_url: None,
            created_at: shared::util::now_millis(),
        }
    }

    /// Render and store the invoice, persisting the URL on the order
    async fn attach_invoice(&self, order: Order) -> AppResult<Order> {
        let doc = self.invoice_document(&order).await?;
        let url = self.invoices.render_and_store(&doc, &order.order_code)?;
        let id = order.id.clone().unwrap_or_default();
        Ok(self.orders.set_invoice_url(&id, &url).await?)
    }

    /// Resolve one requested line against the catalog (no stock movement)
    async fn resolve_line(&self, salon_id: &str, input: &OrderLineInput) -> AppResult<OrderLine> {
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
                        AppError::not_found(format!(
                            "Variant not found for product: {}",
                            input.product_id
                        ))
                    })?,
            ),
            None => None,
        };
        let priced = pricing::price_product_line(&product, variant.as_ref(), input.quantity)?;
        Ok(OrderLine {
            product: priced.product,
            variant: priced.variant,
            quantity: priced.quantity,
            unit_price: priced.unit_price,
            total_price: priced.total_price,
        })
    }

    /// Resolve one line and claim its stock, recording the claim for
    /// compensation
    async fn resolve_and_claim(
        &self,
        salon_id: &str,
        input: &OrderLineInput,
        claims: &mut Vec<StockClaim>,
    ) -> AppResult<OrderLine> {
        let line = self.resolve_line(salon_id, input).await?;

        let (table, id) = stock_target(line.variant.as_deref(), &line.product);
        let claimed = self.products.claim_stock(table, id, line.quantity).await?;
        if !claimed {
            return Err(AppError::business_rule(format!(
                "Not enough stock for product: {}",
                input.product_id
            )));
        }
        claims.push(StockClaim {
            table,
            id: id.to_string(),
            quantity: line.quantity,
        });

        Ok(line)
    }

    /// Compensation: return every claimed line to stock
    async fn release_claims(&self, claims: &[StockClaim]) {
        for claim in claims {
            if let Err(e) = self
                .products
                .restore_stock(claim.table, &claim.id, claim.quantity)
                .await
            {
                tracing::error!(
                    table = claim.table,
                    id = %claim.id,
                    quantity = claim.quantity,
                    error = %e,
                    "Failed to restore claimed stock"
                );
            }
        }
    }
}

/// Which document a line's stock lives on: the variant when one is
/// specified, else the product itself
fn stock_target<'a>(variant: Option<&'a str>, product: &'a str) -> (&'static str, &'a str) {
    match variant {
        Some(v) => ("variant", v),
        None => ("product", product),
    }
}

fn lines_total(lines: &[OrderLine]) -> f64 {
    let total: Decimal = lines.iter().map(|l| to_decimal(l.total_price)).sum();
    to_f64(total)
}

fn or_dash(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-".to_string(),
    }
}

fn method_str(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Card => "card",
        PaymentMethod::Upi => "upi",
    }
}
