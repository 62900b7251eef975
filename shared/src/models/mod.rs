//! Entity models
//!
//! Every entity is scoped by `salon` (tenant id). Models follow the
//! Entity / EntityCreate / EntityUpdate convention: the entity mirrors the
//! stored document, the payload structs carry exactly what the API accepts.

pub mod appointment;
pub mod branch;
pub mod coupon;
pub mod customer;
pub mod customer_package;
pub mod order;
pub mod payment;
pub mod product;
pub mod revenue_commission;
pub mod salon;
pub mod service;
pub mod staff;
pub mod staff_earning;
pub mod staff_payment;
pub mod tax;

pub use appointment::{
    Appointment, AppointmentCreate, AppointmentStatus, AppointmentStatusPatch, AppointmentUpdate,
    PaymentStatus, ProductLine, ProductLineInput, ServiceLine, ServiceLineInput,
};
pub use branch::{Branch, BranchCreate, BranchUpdate};
pub use coupon::{Coupon, CouponCreate, CouponUpdate, DiscountType};
pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use customer_package::{
    CustomerPackage, CustomerPackageCreate, CustomerPackageUpdate, PackageDetail,
    PackageEntitlement,
};
pub use order::{Order, OrderCreate, OrderLine, OrderLineInput, PaymentMethod};
pub use payment::{Payment, PaymentCreate};
pub use product::{Product, ProductCreate, ProductUpdate, Variant, VariantCreate, VariantUpdate};
pub use revenue_commission::{
    CommissionSlot, CommissionType, RevenueCommission, RevenueCommissionCreate,
    RevenueCommissionUpdate,
};
pub use salon::{Salon, SalonCreate, SalonUpdate};
pub use service::{Service, ServiceCreate, ServiceUpdate};
pub use staff::{Staff, StaffCreate, StaffUpdate};
pub use staff_earning::{StaffEarning, StaffEarningView};
pub use staff_payment::{StaffPayment, StaffPayoutRequest};
pub use tax::{Tax, TaxCreate, TaxUpdate};
