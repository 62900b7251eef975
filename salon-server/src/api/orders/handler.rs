//! Order API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderCreate, OrderLineInput};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub salon_id: String,
    pub customer_id: Option<String>,
}

/// Order plus derived list fields
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub product_count: usize,
}

/// GET /api/order - 获取订单列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all(&query.salon_id, query.customer_id.as_deref())
        .await?;
    let views = orders
        .into_iter()
        .map(|order| OrderView {
            product_count: order.products.len(),
            order,
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/order/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/order - 创建订单 (claims stock, renders invoice)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders().create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update payload — replacement line set, re-priced against the catalog
#[derive(Debug, Deserialize)]
pub struct OrderUpdate {
    pub products: Vec<OrderLineInput>,
}

/// PUT /api/order/:id - 重新定价订单行
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    if payload.products.is_empty() {
        return Err(AppError::invalid("products array is empty"));
    }
    let order = state.orders().reprice(&id, payload.products).await?;
    Ok(Json(order))
}

/// DELETE /api/order/:id - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    match repo.delete(&id).await? {
        true => Ok(Json(true)),
        false => Err(AppError::not_found(format!("Order {} not found", id))),
    }
}
