//! Product API 模块 (catalog + variants)

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/variants",
            get(handler::list_variants).post(handler::create_variant),
        )
        .route(
            "/variants/{variant_id}",
            get(handler::get_variant)
                .put(handler::update_variant)
                .delete(handler::delete_variant),
        )
}
