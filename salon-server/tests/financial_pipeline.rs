//! End-to-end tests of the appointment-to-payment financial pipeline
//! against an in-memory database.
//!
//! Run: cargo test -p salon-server --test financial_pipeline

use std::sync::Arc;

use surrealdb::engine::local::{Db, Mem};
use surrealdb::Surreal;

use salon_server::booking::BookingEngine;
use salon_server::db::repository::{
    AppointmentRepository, CustomerPackageRepository, OrderRepository, PaymentRepository,
    ProductRepository, SalonRepository, ServiceRepository, StaffPaymentRepository,
    StaffRepository,
};
use salon_server::earnings::{EarningsAggregator, PayoutLocks};
use salon_server::invoicing::{InvoiceDocument, InvoiceRenderer, InvoiceService, InvoiceStore};
use salon_server::orders::OrderService;
use salon_server::settlement::SettlementEngine;
use salon_server::utils::AppResult;
use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatus, BranchCreate, CommissionSlot,
    CommissionType, CouponCreate, CustomerCreate, CustomerPackageCreate, DiscountType,
    OrderCreate, OrderLineInput, PackageDetail, PaymentCreate, PaymentMethod, PaymentStatus,
    ProductCreate, ProductLine, ProductLineInput, RevenueCommissionCreate, SalonCreate,
    ServiceCreate, ServiceLine, ServiceLineInput, StaffCreate, StaffPayoutRequest,
    VariantCreate,
};

/// Renderer stub — the pipeline only needs bytes, not a real PDF engine
struct StubRenderer;

impl InvoiceRenderer for StubRenderer {
    fn render(&self, _doc: &InvoiceDocument) -> AppResult<Vec<u8>> {
        Ok(b"%PDF-stub".to_vec())
    }
}

struct TestEnv {
    db: Surreal<Db>,
    invoices: InvoiceService,
    _tmp: tempfile::TempDir,
}

impl TestEnv {
    async fn new() -> Self {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("salon").use_db("salon").await.unwrap();
        salon_server::db::bootstrap_schema(&db).await.unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let store = InvoiceStore::new(tmp.path().join("uploads")).unwrap();
        let invoices = InvoiceService::new(Arc::new(StubRenderer), store);

        Self {
            db,
            invoices,
            _tmp: tmp,
        }
    }

    fn orders(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.invoices.clone())
    }

    fn booking(&self) -> BookingEngine {
        BookingEngine::new(self.db.clone(), self.orders())
    }

    fn settlement(&self) -> SettlementEngine {
        SettlementEngine::new(self.db.clone(), self.orders(), self.invoices.clone())
    }

    fn earnings(&self, locks: Arc<PayoutLocks>) -> EarningsAggregator {
        EarningsAggregator::new(self.db.clone(), locks)
    }
}

/// Seeded tenant with one branch, customer, service, staff
struct Tenant {
    salon_id: String,
    branch_id: String,
    customer_id: String,
    service_id: String,
    staff_id: String,
}

async fn seed_tenant(env: &TestEnv) -> Tenant {
    let salon = SalonRepository::new(env.db.clone())
        .create(SalonCreate {
            salon_name: "Aura Salon".to_string(),
            address: Some("12 Rose Street".to_string()),
            contact_number: Some("+91 99999 88888".to_string()),
            contact_email: Some("hello@aura.example".to_string()),
        })
        .await
        .unwrap();
    let salon_id = salon.id.unwrap();

    let branch = salon_server::db::repository::BranchRepository::new(env.db.clone())
        .create(BranchCreate {
            salon_id: salon_id.clone(),
            name: "Downtown".to_string(),
            address: None,
            contact_number: None,
            contact_email: None,
        })
        .await
        .unwrap();

    let customer = salon_server::db::repository::CustomerRepository::new(env.db.clone())
        .create(CustomerCreate {
            salon_id: salon_id.clone(),
            full_name: "Priya Sharma".to_string(),
            email: None,
            phone_number: Some("+91 77777 66666".to_string()),
            gender: None,
            notes: None,
        })
        .await
        .unwrap();

    let service = ServiceRepository::new(env.db.clone())
        .create(ServiceCreate {
            salon_id: salon_id.clone(),
            name: "Haircut".to_string(),
            service_duration: 45,
            regular_price: 500.0,
            members_price: None,
            description: None,
        })
        .await
        .unwrap();

    let staff = StaffRepository::new(env.db.clone())
        .create(StaffCreate {
            salon_id: salon_id.clone(),
            branch_id: branch.id.clone().unwrap(),
            full_name: "Anil Kumar".to_string(),
            email: None,
            phone_number: None,
            gender: None,
            service_ids: None,
            commission_id: None,
        })
        .await
        .unwrap();

    Tenant {
        salon_id,
        branch_id: branch.id.unwrap(),
        customer_id: customer.id.unwrap(),
        service_id: service.id.unwrap(),
        staff_id: staff.id.unwrap(),
    }
}

fn appointment_request(tenant: &Tenant) -> AppointmentCreate {
    AppointmentCreate {
        salon_id: tenant.salon_id.clone(),
        customer_id: tenant.customer_id.clone(),
        branch_id: tenant.branch_id.clone(),
        appointment_date: "2025-03-01".to_string(),
        appointment_time: "10:30".to_string(),
        services: vec![ServiceLineInput {
            service_id: tenant.service_id.clone(),
            staff_id: tenant.staff_id.clone(),
        }],
        products: vec![],
        notes: None,
        status: None,
        payment_status: None,
        payment_method: None,
    }
}

// ============================================================================
// Booking: totals and entitlement consumption
// ============================================================================

#[tokio::test]
async fn booking_totals_match_resolved_lines() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;

    let product = ProductRepository::new(env.db.clone())
        .create(ProductCreate {
            salon_id: tenant.salon_id.clone(),
            branch_ids: None,
            product_name: "Argan Oil".to_string(),
            description: None,
            price: Some(450.0),
            stock: Some(10),
            sku: None,
        })
        .await
        .unwrap();

    let mut req = appointment_request(&tenant);
    req.products = vec![ProductLineInput {
        product_id: product.id.clone().unwrap(),
        variant_id: None,
        quantity: 2,
    }];

    let appointment = env.booking().create(req).await.unwrap();

    assert_eq!(appointment.service_total, 500.0);
    assert_eq!(appointment.product_total, 900.0);
    assert_eq!(appointment.total_payment, 1400.0);
    assert!(!appointment.services[0].used_package);
    assert!(appointment.order_code.starts_with("ORD-"));

    // The product purchase spawned an order with deducted stock
    let orders = OrderRepository::new(env.db.clone())
        .find_all(&tenant.salon_id, None)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total_price, 900.0);
    assert!(orders[0].invoice_pdf_url.is_some());

    let product_after = ProductRepository::new(env.db.clone())
        .find_by_id(&product.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product_after.stock, Some(8));
}

#[tokio::test]
async fn booking_consumes_package_entitlement() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;

    let packages = CustomerPackageRepository::new(env.db.clone());
    let package = packages
        .create(
            CustomerPackageCreate {
                salon_id: tenant.salon_id.clone(),
                customer_id: tenant.customer_id.clone(),
                package_name: Some("Glow pack".to_string()),
                description: None,
                package_price: Some(1200.0),
                start_date: "2025-01-01".to_string(),
                end_date: "2099-12-31".to_string(),
                package_details: vec![PackageDetail {
                    service: tenant.service_id.clone(),
                    discounted_price: Some(400.0),
                    quantity: 2,
                }],
            },
            0,
            4_102_444_800_000, // 2099-12-31
        )
        .await
        .unwrap();

    let appointment = env
        .booking()
        .create(appointment_request(&tenant))
        .await
        .unwrap();

    assert!(appointment.services[0].used_package);
    assert_eq!(appointment.services[0].amount, 0.0);
    assert_eq!(
        appointment.services[0].package.as_deref(),
        package.id.as_deref()
    );
    assert_eq!(appointment.total_payment, 0.0);

    let remaining = packages
        .entitlements(&package.id.unwrap())
        .await
        .unwrap();
    assert_eq!(remaining[0].quantity, 1);
}

#[tokio::test]
async fn entitlement_conservation_under_concurrent_bookings() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;

    let packages = CustomerPackageRepository::new(env.db.clone());
    let package = packages
        .create(
            CustomerPackageCreate {
                salon_id: tenant.salon_id.clone(),
                customer_id: tenant.customer_id.clone(),
                package_name: None,
                description: None,
                package_price: None,
                start_date: "2025-01-01".to_string(),
                end_date: "2099-12-31".to_string(),
                package_details: vec![PackageDetail {
                    service: tenant.service_id.clone(),
                    discounted_price: None,
                    quantity: 5,
                }],
            },
            0,
            4_102_444_800_000,
        )
        .await
        .unwrap();

    // 8 concurrent consumers against quantity 5
    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = CustomerPackageRepository::new(env.db.clone());
        let salon = tenant.salon_id.clone();
        let customer = tenant.customer_id.clone();
        let service = tenant.service_id.clone();
        handles.push(tokio::spawn(async move {
            repo.consume_entitlement(&salon, &customer, &service, 0)
                .await
                .unwrap()
        }));
    }

    let mut consumed = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            consumed += 1;
        }
    }
    assert_eq!(consumed, 5, "exactly Q consumers may succeed");

    let remaining = packages
        .entitlements(&package.id.unwrap())
        .await
        .unwrap();
    assert_eq!(remaining[0].quantity, 0, "quantity never goes negative");
}

// ============================================================================
// Orders: stock monotonicity and round-trip
// ============================================================================

#[tokio::test]
async fn order_rejects_insufficient_stock_and_restores_claims() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    let products = ProductRepository::new(env.db.clone());

    let in_stock = products
        .create(ProductCreate {
            salon_id: tenant.salon_id.clone(),
            branch_ids: None,
            product_name: "Conditioner".to_string(),
            description: None,
            price: Some(300.0),
            stock: Some(10),
            sku: None,
        })
        .await
        .unwrap();
    let scarce = products
        .create(ProductCreate {
            salon_id: tenant.salon_id.clone(),
            branch_ids: None,
            product_name: "Hair Serum".to_string(),
            description: None,
            price: Some(800.0),
            stock: Some(1),
            sku: None,
        })
        .await
        .unwrap();

    let result = env
        .orders()
        .create(OrderCreate {
            salon_id: tenant.salon_id.clone(),
            branch_id: tenant.branch_id.clone(),
            customer_id: tenant.customer_id.clone(),
            products: vec![
                OrderLineInput {
                    product_id: in_stock.id.clone().unwrap(),
                    variant_id: None,
                    quantity: 4,
                },
                OrderLineInput {
                    product_id: scarce.id.clone().unwrap(),
                    variant_id: None,
                    quantity: 3,
                },
            ],
            payment_method: PaymentMethod::Cash,
        })
        .await;

    assert!(result.is_err(), "second line exceeds available stock");

    // The first line's claim was compensated — nothing stays short
    let first = products
        .find_by_id(&in_stock.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    let second = products
        .find_by_id(&scarce.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.stock, Some(10));
    assert_eq!(second.stock, Some(1));

    let orders = OrderRepository::new(env.db.clone())
        .find_all(&tenant.salon_id, None)
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn order_round_trip_preserves_line_totals() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    let products = ProductRepository::new(env.db.clone());

    let product = products
        .create(ProductCreate {
            salon_id: tenant.salon_id.clone(),
            branch_ids: None,
            product_name: "Shampoo".to_string(),
            description: None,
            price: Some(199.99),
            stock: Some(50),
            sku: None,
        })
        .await
        .unwrap();
    let variant = products
        .create_variant(VariantCreate {
            salon_id: tenant.salon_id.clone(),
            product_id: product.id.clone().unwrap(),
            name: "500ml".to_string(),
            price: Some(349.5),
            stock: Some(6),
        })
        .await
        .unwrap();

    let created = env
        .orders()
        .create(OrderCreate {
            salon_id: tenant.salon_id.clone(),
            branch_id: tenant.branch_id.clone(),
            customer_id: tenant.customer_id.clone(),
            products: vec![
                OrderLineInput {
                    product_id: product.id.clone().unwrap(),
                    variant_id: None,
                    quantity: 3,
                },
                OrderLineInput {
                    product_id: product.id.clone().unwrap(),
                    variant_id: Some(variant.id.clone().unwrap()),
                    quantity: 2,
                },
            ],
            payment_method: PaymentMethod::Card,
        })
        .await
        .unwrap();

    let fetched = OrderRepository::new(env.db.clone())
        .find_by_id(&created.id.unwrap())
        .await
        .unwrap()
        .unwrap();

    for line in &fetched.products {
        let expected = salon_server::money::to_f64(salon_server::money::line_total(
            line.unit_price,
            line.quantity,
        ));
        assert_eq!(line.total_price, expected);
    }
    assert_eq!(fetched.total_price, 3.0 * 199.99 + 2.0 * 349.5);

    // Variant stock moved, product stock moved, independently
    let product_after = products
        .find_by_id(&product.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    let variant_after = products
        .find_variant(&variant.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product_after.stock, Some(47));
    assert_eq!(variant_after.stock, Some(4));
}

// ============================================================================
// Settlement
// ============================================================================

#[tokio::test]
async fn settlement_applies_coupon_tax_and_tips() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;

    // Two services at 500 each → sub_total 1000
    let mut req = appointment_request(&tenant);
    req.services.push(ServiceLineInput {
        service_id: tenant.service_id.clone(),
        staff_id: tenant.staff_id.clone(),
    });
    let appointment = env.booking().create(req).await.unwrap();

    let coupon = salon_server::db::repository::CouponRepository::new(env.db.clone())
        .create(
            CouponCreate {
                salon_id: tenant.salon_id.clone(),
                branch_ids: None,
                name: "Welcome".to_string(),
                description: None,
                coupon_code: "WELCOME10".to_string(),
                discount_type: DiscountType::Percent,
                discount_amount: 10.0,
                start_date: "2020-01-01".to_string(),
                end_date: "2099-12-31".to_string(),
                use_limit: None,
            },
            0,
            4_102_444_800_000,
        )
        .await
        .unwrap();
    let tax = salon_server::db::repository::TaxRepository::new(env.db.clone())
        .create(shared::models::TaxCreate {
            salon_id: tenant.salon_id.clone(),
            branch_ids: None,
            title: "GST".to_string(),
            value: 5.0,
            tax_type: DiscountType::Percent,
        })
        .await
        .unwrap();

    let (payment, invoice_url) = env
        .settlement()
        .settle(PaymentCreate {
            appointment_id: appointment.id.clone().unwrap(),
            payment_method: "card".to_string(),
            coupon_id: coupon.id.clone(),
            tax_id: tax.id.clone(),
            additional_discount: 0.0,
            tips: 0.0,
        })
        .await
        .unwrap();

    assert_eq!(payment.sub_total, 1000.0);
    assert_eq!(payment.coupon_discount, 100.0);
    assert_eq!(payment.tax_amount, 50.0);
    assert_eq!(payment.final_total, 950.0);
    assert!(invoice_url.starts_with("/api/uploads/invoice-"));

    // The invoice artifact is retrievable
    let file_name = invoice_url.trim_start_matches("/api/uploads/");
    assert!(env.invoices.store().read(file_name).is_ok());

    // Appointment flipped to Paid
    let settled = AppointmentRepository::new(env.db.clone())
        .find_by_id(&appointment.id.clone().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled.payment_status, PaymentStatus::Paid);

    // Second settlement of the same appointment is a conflict
    let again = env
        .settlement()
        .settle(PaymentCreate {
            appointment_id: appointment.id.unwrap(),
            payment_method: "cash".to_string(),
            coupon_id: None,
            tax_id: None,
            additional_discount: 0.0,
            tips: 0.0,
        })
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn settlement_ignores_expired_coupon() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    let appointment = env
        .booking()
        .create(appointment_request(&tenant))
        .await
        .unwrap();

    let coupon = salon_server::db::repository::CouponRepository::new(env.db.clone())
        .create(
            CouponCreate {
                salon_id: tenant.salon_id.clone(),
                branch_ids: None,
                name: "Bygone".to_string(),
                description: None,
                coupon_code: "OLD".to_string(),
                discount_type: DiscountType::Percent,
                discount_amount: 50.0,
                start_date: "2020-01-01".to_string(),
                end_date: "2020-12-31".to_string(),
                use_limit: None,
            },
            1_577_836_800_000,
            1_609_459_199_999,
        )
        .await
        .unwrap();

    let (payment, _) = env
        .settlement()
        .settle(PaymentCreate {
            appointment_id: appointment.id.unwrap(),
            payment_method: "cash".to_string(),
            coupon_id: coupon.id,
            tax_id: None,
            additional_discount: 0.0,
            tips: 50.0,
        })
        .await
        .unwrap();

    assert_eq!(payment.coupon_discount, 0.0, "expired coupon contributes 0");
    assert_eq!(payment.final_total, 550.0);
}

// ============================================================================
// Earnings and payout
// ============================================================================

/// Seed a checked-out appointment directly, bypassing the booking engine
async fn seed_checked_out_appointment(
    env: &TestEnv,
    tenant: &Tenant,
    amount: f64,
) -> Appointment {
    AppointmentRepository::new(env.db.clone())
        .create(Appointment {
            id: None,
            salon: tenant.salon_id.clone(),
            customer: tenant.customer_id.clone(),
            branch: tenant.branch_id.clone(),
            appointment_date: 1_740_787_200_000,
            appointment_time: "11:00".to_string(),
            services: vec![ServiceLine {
                service: tenant.service_id.clone(),
                staff: tenant.staff_id.clone(),
                amount,
                used_package: false,
                package: None,
                paid: false,
                commission_earned: None,
            }],
            products: Vec::<ProductLine>::new(),
            notes: None,
            status: AppointmentStatus::CheckOut,
            payment_status: PaymentStatus::Pending,
            service_total: amount,
            product_total: 0.0,
            total_payment: amount,
            order_code: shared::util::appointment_order_code(),
            created_at: shared::util::now_millis(),
        })
        .await
        .unwrap()
}

async fn assign_commission(env: &TestEnv, tenant: &Tenant) {
    let rule = salon_server::db::repository::RevenueCommissionRepository::new(env.db.clone())
        .create(RevenueCommissionCreate {
            salon_id: tenant.salon_id.clone(),
            branch_id: tenant.branch_id.clone(),
            commission_name: "Stylist tiers".to_string(),
            commission_type: CommissionType::Percentage,
            commission: vec![
                CommissionSlot {
                    slot: "0-500".to_string(),
                    amount: 10.0,
                },
                CommissionSlot {
                    slot: "501-1000".to_string(),
                    amount: 15.0,
                },
            ],
        })
        .await
        .unwrap();

    StaffRepository::new(env.db.clone())
        .update(
            &tenant.staff_id,
            shared::models::StaffUpdate {
                branch_id: None,
                full_name: None,
                email: None,
                phone_number: None,
                gender: None,
                service_ids: None,
                commission_id: rule.id,
                is_active: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn recompute_derives_commission_and_tips() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    assign_commission(&env, &tenant).await;

    let appointment = seed_checked_out_appointment(&env, &tenant, 700.0).await;

    // A settled payment with tips on that appointment
    env.settlement()
        .settle(PaymentCreate {
            appointment_id: appointment.id.clone().unwrap(),
            payment_method: "cash".to_string(),
            coupon_id: None,
            tax_id: None,
            additional_discount: 0.0,
            tips: 80.0,
        })
        .await
        .unwrap();

    let locks = Arc::new(PayoutLocks::new());
    let views = env
        .earnings(locks)
        .recompute(&tenant.salon_id)
        .await
        .unwrap();

    let view = views
        .iter()
        .find(|v| v.staff_id == tenant.staff_id)
        .expect("staff view present");
    assert_eq!(view.total_booking, 1);
    assert_eq!(view.service_amount, 700.0);
    // 700 falls in the 501-1000 slot at 15%
    assert_eq!(view.commission_earning, 105.0);
    assert_eq!(view.tip_earning, 80.0);
    assert_eq!(view.staff_earning, 185.0);
}

#[tokio::test]
async fn payout_is_exclusive_under_concurrency() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    assign_commission(&env, &tenant).await;
    seed_checked_out_appointment(&env, &tenant, 700.0).await;

    let locks = Arc::new(PayoutLocks::new());
    let mut handles = Vec::new();
    for _ in 0..2 {
        let aggregator = env.earnings(locks.clone());
        let staff_id = tenant.staff_id.clone();
        let salon_id = tenant.salon_id.clone();
        handles.push(tokio::spawn(async move {
            aggregator
                .payout(
                    &staff_id,
                    StaffPayoutRequest {
                        salon_id,
                        payment_method: "cash".to_string(),
                        description: None,
                    },
                )
                .await
                .unwrap()
        }));
    }

    let mut totals = Vec::new();
    for handle in handles {
        totals.push(handle.await.unwrap().total_paid);
    }

    // One call pays the full 105, the duplicate settles on zero
    let sum: f64 = totals.iter().sum();
    assert_eq!(sum, 105.0);
    assert!(totals.contains(&105.0));
    assert!(totals.contains(&0.0));

    // Every line is flagged paid exactly once
    let appointments = AppointmentRepository::new(env.db.clone())
        .find_checked_out(&tenant.salon_id)
        .await
        .unwrap();
    assert!(appointments
        .iter()
        .flat_map(|a| &a.services)
        .all(|line| line.paid));

    let payments = StaffPaymentRepository::new(env.db.clone())
        .find_by_staff(&tenant.salon_id, &tenant.staff_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);

    // A third payout after the dust settles still finds nothing to pay
    let third = env
        .earnings(locks)
        .payout(
            &tenant.staff_id,
            StaffPayoutRequest {
                salon_id: tenant.salon_id.clone(),
                payment_method: "cash".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(third.total_paid, 0.0);
}

#[tokio::test]
async fn payout_clears_the_working_aggregate() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    assign_commission(&env, &tenant).await;
    seed_checked_out_appointment(&env, &tenant, 400.0).await;

    let locks = Arc::new(PayoutLocks::new());
    let aggregator = env.earnings(locks.clone());

    aggregator.recompute(&tenant.salon_id).await.unwrap();
    let earnings_repo =
        salon_server::db::repository::StaffEarningRepository::new(env.db.clone());
    assert!(earnings_repo
        .find_by_staff(&tenant.salon_id, &tenant.staff_id)
        .await
        .unwrap()
        .is_some());

    let payment = aggregator
        .payout(
            &tenant.staff_id,
            StaffPayoutRequest {
                salon_id: tenant.salon_id.clone(),
                payment_method: "CASH".to_string(),
                description: Some("weekly payout".to_string()),
            },
        )
        .await
        .unwrap();
    // 400 falls in the 0-500 slot at 10%
    assert_eq!(payment.commission_amount, 40.0);
    assert_eq!(payment.payment_method, "cash");

    assert!(earnings_repo
        .find_by_staff(&tenant.salon_id, &tenant.staff_id)
        .await
        .unwrap()
        .is_none());

    // Paid lines stay excluded from the next unpaid derivation
    let detail = aggregator
        .staff_detail(&tenant.salon_id, &tenant.staff_id)
        .await
        .unwrap();
    assert_eq!(detail.total_booking, 0);
    assert_eq!(detail.commission_earning, 0.0);
}

// ============================================================================
// Payments listing source data
// ============================================================================

#[tokio::test]
async fn settled_payment_is_listed_for_the_tenant() {
    let env = TestEnv::new().await;
    let tenant = seed_tenant(&env).await;
    let appointment = env
        .booking()
        .create(appointment_request(&tenant))
        .await
        .unwrap();

    env.settlement()
        .settle(PaymentCreate {
            appointment_id: appointment.id.unwrap(),
            payment_method: "upi".to_string(),
            coupon_id: Some(String::new()), // empty ids are treated as absent
            tax_id: None,
            additional_discount: 0.0,
            tips: 0.0,
        })
        .await
        .unwrap();

    let payments = PaymentRepository::new(env.db.clone())
        .find_all(&tenant.salon_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].final_total, 500.0);
    assert_eq!(payments[0].coupon, None);
}
