//! Appointment API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{
    AppointmentRepository, BranchRepository, CustomerPackageRepository, CustomerRepository,
    ProductRepository, ServiceRepository, StaffRepository,
};
use crate::utils::{time, AppError, AppResult};
use shared::models::{
    Appointment, AppointmentCreate, AppointmentStatus, AppointmentStatusPatch, AppointmentUpdate,
    Branch, Customer, CustomerPackage, PaymentStatus, Service, Staff, Variant,
};

/// Query params for listing appointments
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub salon_id: String,
    /// Optional YYYY-MM-DD filter
    pub date: Option<String>,
}

/// Enriched service line view
#[derive(Debug, Serialize)]
pub struct ServiceDetail {
    pub service: Option<Service>,
    pub staff: Option<Staff>,
    pub service_amount: f64,
    pub used_package: bool,
    pub package: Option<String>,
}

/// Enriched product line view
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub variant: Option<Variant>,
}

/// Enriched per-appointment view returned by the list endpoint
#[derive(Debug, Serialize)]
pub struct AppointmentDetail {
    pub appointment_id: String,
    pub appointment_date: i64,
    pub appointment_time: String,
    pub notes: Option<String>,
    pub customer: Option<Customer>,
    pub branch: Option<Branch>,
    /// The customer's purchased packages (entitlement context for the
    /// zero-amount service lines)
    pub customer_packages: Vec<CustomerPackage>,
    pub services: Vec<ServiceDetail>,
    pub products: Vec<ProductDetail>,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub total_payment: f64,
    pub service_total_amount: f64,
    pub product_total_amount: f64,
    pub order_code: String,
}

/// GET /api/appointments - 获取预约列表 (enriched view)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<AppointmentDetail>>> {
    let date_range = match &query.date {
        Some(date) => Some(time::day_range_millis(date)?),
        None => None,
    };

    let repo = AppointmentRepository::new(state.db.clone());
    let appointments = repo.find_all(&query.salon_id, date_range).await?;

    let mut details = Vec::with_capacity(appointments.len());
    for appointment in appointments {
        details.push(enrich(&state, appointment).await?);
    }
    Ok(Json(details))
}

/// GET /api/appointments/:id - 获取单个预约
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppointmentDetail>> {
    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;
    Ok(Json(enrich(&state, appointment).await?))
}

/// POST /api/appointments - 创建预约
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.booking().create(payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/appointments/:id - 更新预约 (re-prices supplied line arrays)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AppointmentUpdate>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.booking().update(&id, payload).await?;
    Ok(Json(appointment))
}

/// PATCH /api/appointments/:id - 状态变更 (status / payment_status)
pub async fn patch_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AppointmentStatusPatch>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.booking().patch_status(&id, payload).await?;
    Ok(Json(appointment))
}

/// DELETE /api/appointments/:id - 删除预约
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.booking().delete(&id).await?;
    Ok(Json(true))
}

/// Resolve line references into the enriched view
async fn enrich(
    state: &ServerState,
    appointment: Appointment,
) -> AppResult<AppointmentDetail> {
    let customers = CustomerRepository::new(state.db.clone());
    let branches = BranchRepository::new(state.db.clone());
    let services = ServiceRepository::new(state.db.clone());
    let staff_repo = StaffRepository::new(state.db.clone());
    let products = ProductRepository::new(state.db.clone());

    let customer = customers.find_by_id(&appointment.customer).await?;
    let branch = branches.find_by_id(&appointment.branch).await?;
    let customer_packages = CustomerPackageRepository::new(state.db.clone())
        .find_all(&appointment.salon, Some(&appointment.customer))
        .await?;

    let mut service_details = Vec::with_capacity(appointment.services.len());
    for line in &appointment.services {
        service_details.push(ServiceDetail {
            service: services.find_by_id(&line.service).await?,
            staff: staff_repo.find_by_id(&line.staff).await?,
            service_amount: line.amount,
            used_package: line.used_package,
            package: line.package.clone(),
        });
    }

    let mut product_details = Vec::with_capacity(appointment.products.len());
    for line in &appointment.products {
        let product = products.find_by_id(&line.product).await?;
        let variant = match &line.variant {
            Some(variant_id) => products.find_variant(variant_id).await?,
            None => None,
        };
        product_details.push(ProductDetail {
            id: line.product.clone(),
            name: product.as_ref().map(|p| p.product_name.clone()),
            description: product.and_then(|p| p.description),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
            variant,
        });
    }

    Ok(AppointmentDetail {
        appointment_id: appointment.id.unwrap_or_default(),
        appointment_date: appointment.appointment_date,
        appointment_time: appointment.appointment_time,
        notes: appointment.notes,
        customer,
        branch,
        customer_packages,
        services: service_details,
        products: product_details,
        status: appointment.status,
        payment_status: appointment.payment_status,
        total_payment: appointment.total_payment,
        service_total_amount: appointment.service_total,
        product_total_amount: appointment.product_total,
        order_code: appointment.order_code,
    })
}
