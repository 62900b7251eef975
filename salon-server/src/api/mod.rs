//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`appointments`] - 预约管理接口 (booking engine)
//! - [`orders`] - 商品订单接口 (stock + invoice)
//! - [`payments`] - 支付结算接口
//! - [`staff_earnings`] - 员工收益和结算接口
//! - [`uploads`] - 发票 PDF 下载
//! - 其余为目录数据 CRUD (salons/branches/customers/services/products/
//!   customer_packages/coupons/taxes/staff/revenue_commissions)

pub mod health;
pub mod uploads;

// Financial pipeline
pub mod appointments;
pub mod orders;
pub mod payments;
pub mod staff_earnings;

// Catalog / collaborator data
pub mod branches;
pub mod coupons;
pub mod customer_packages;
pub mod customers;
pub mod products;
pub mod revenue_commissions;
pub mod salons;
pub mod services;
pub mod staff;
pub mod taxes;

use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// 租户过滤参数 — 所有列表接口都要求 salon_id
#[derive(Debug, Deserialize)]
pub struct TenantQuery {
    pub salon_id: String,
}

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(uploads::router())
        .merge(appointments::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(staff_earnings::router())
        .merge(salons::router())
        .merge(branches::router())
        .merge(customers::router())
        .merge(services::router())
        .merge(products::router())
        .merge(customer_packages::router())
        .merge(coupons::router())
        .merge(taxes::router())
        .merge(staff::router())
        .merge(revenue_commissions::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
