//! Uploads API 模块 (invoice artifacts)

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/uploads/{file_name}", get(handler::serve))
}
