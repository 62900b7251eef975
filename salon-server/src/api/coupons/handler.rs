//! Coupon API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::TenantQuery;
use crate::core::ServerState;
use crate::db::repository::CouponRepository;
use crate::money;
use crate::utils::{time, AppError, AppResult};
use shared::models::{Coupon, CouponCreate, CouponUpdate};

/// GET /api/coupons - 获取优惠券列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TenantQuery>,
) -> AppResult<Json<Vec<Coupon>>> {
    let coupons = CouponRepository::new(state.db.clone())
        .find_all(&query.salon_id)
        .await?;
    Ok(Json(coupons))
}

/// GET /api/coupons/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Coupon>> {
    let coupon = CouponRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    Ok(Json(coupon))
}

/// POST /api/coupons - 创建优惠券 (有效期含起止两端当日)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<(StatusCode, Json<Coupon>)> {
    money::validate_price(payload.discount_amount, "discount_amount")?;
    let start = time::day_start_millis(time::parse_date(&payload.start_date)?);
    let end = time::end_of_day_millis(time::parse_date(&payload.end_date)?);

    let coupon = CouponRepository::new(state.db.clone())
        .create(payload, start, end)
        .await?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// PUT /api/coupons/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    if let Some(amount) = payload.discount_amount {
        money::validate_price(amount, "discount_amount")?;
    }
    let start = match &payload.start_date {
        Some(date) => Some(time::day_start_millis(time::parse_date(date)?)),
        None => None,
    };
    let end = match &payload.end_date {
        Some(date) => Some(time::end_of_day_millis(time::parse_date(date)?)),
        None => None,
    };

    let coupon = CouponRepository::new(state.db.clone())
        .update(&id, payload, start, end)
        .await?;
    Ok(Json(coupon))
}

/// DELETE /api/coupons/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    match CouponRepository::new(state.db.clone()).delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Coupon {} not found", id))),
    }
}
