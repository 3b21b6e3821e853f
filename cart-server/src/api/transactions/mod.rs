//! Transaction API 模块 (管理看板)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/transactions", get(handler::list))
        .route("/api/transactions/stats", get(handler::stats))
}
