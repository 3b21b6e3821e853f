//! Payment API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/payment/create-order | POST | 创建网关订单 |
//! | /api/payment/verify | POST | 校验网关支付签名 |
//! | /api/payment/cash | POST | 现金收款 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/create-order", post(handler::create_order))
        .route("/verify", post(handler::verify))
        .route("/cash", post(handler::cash))
}
