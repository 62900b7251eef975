//! Customer Package API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::CustomerPackageRepository;
use crate::utils::{time, AppError, AppResult};
use shared::models::{
    CustomerPackage, CustomerPackageCreate, CustomerPackageUpdate, PackageEntitlement,
};

/// Query params for listing packages
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub salon_id: String,
    pub customer_id: Option<String>,
}

/// GET /api/customer-packages - 获取客户套餐
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CustomerPackage>>> {
    let packages = CustomerPackageRepository::new(state.db.clone())
        .find_all(&query.salon_id, query.customer_id.as_deref())
        .await?;
    Ok(Json(packages))
}

/// GET /api/customer-packages/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CustomerPackage>> {
    let package = CustomerPackageRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer package {} not found", id)))?;
    Ok(Json(package))
}

/// GET /api/customer-packages/:id/entitlements - 剩余可用次数
pub async fn entitlements(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<PackageEntitlement>>> {
    let rows = CustomerPackageRepository::new(state.db.clone())
        .entitlements(&id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/customer-packages - 购买套餐
///
/// 套餐在 `end_date` 当天结束前 (含当日) 都可用。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerPackageCreate>,
) -> AppResult<(StatusCode, Json<CustomerPackage>)> {
    for detail in &payload.package_details {
        if detail.quantity <= 0 {
            return Err(AppError::validation(
                "Package detail quantity must be positive",
            ));
        }
    }

    let start = time::day_start_millis(time::parse_date(&payload.start_date)?);
    let end = time::end_of_day_millis(time::parse_date(&payload.end_date)?);
    if end < start {
        return Err(AppError::validation("end_date must not precede start_date"));
    }

    let package = CustomerPackageRepository::new(state.db.clone())
        .create(payload, start, end)
        .await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// PUT /api/customer-packages/:id - 更新描述性字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerPackageUpdate>,
) -> AppResult<Json<CustomerPackage>> {
    let end_date = match &payload.end_date {
        Some(date) => Some(time::end_of_day_millis(time::parse_date(date)?)),
        None => None,
    };
    let package = CustomerPackageRepository::new(state.db.clone())
        .update_descriptive(&id, payload, end_date)
        .await?;
    Ok(Json(package))
}

/// DELETE /api/customer-packages/:id - 删除套餐及其剩余权益
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match CustomerPackageRepository::new(state.db.clone())
        .delete(&id)
        .await?
    {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!(
            "Customer package {} not found",
            id
        ))),
    }
}
