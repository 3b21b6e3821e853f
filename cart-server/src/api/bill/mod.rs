//! Bill API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/bill", get(handler::get))
        .route("/api/bill/reset", post(handler::reset))
}
