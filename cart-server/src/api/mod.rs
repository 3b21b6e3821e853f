//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 服务横幅和健康检查
//! - [`carts`] - 扫码、购物车、支付标记与出口核验
//! - [`inventory`] - 商品清单
//! - [`transactions`] - 交易流水与看板汇总
//! - [`bill`] - 账单总额
//! - [`payment`] - 网关支付与现金收款

pub mod bill;
pub mod carts;
pub mod extract;
pub mod health;
pub mod inventory;
pub mod payment;
pub mod transactions;

use std::time::Instant;

use axum::{Router, middleware};
use http::HeaderValue;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::core::{Config, ServerState};

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
pub use extract::JsonBody;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        target: "http_access",
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        latency_ms,
        "{} {} {}",
        method,
        uri,
        status
    );

    response
}

/// 跨域策略：允许任意来源，或只允许配置的前端来源
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allow_all_origins {
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT])
        .allow_credentials(true)
}

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(carts::router())
        .merge(inventory::router())
        .merge(transactions::router())
        .merge(bill::router())
        .merge(payment::router())
}

/// Build a fully configured application with middleware and state
///
/// HTTP 服务器和测试 (oneshot) 共用
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config);
    build_router()
        .with_state(state)
        // ========== Tower HTTP Middleware ==========
        .layer(cors)
        .layer(CompressionLayer::new())
        // Request logging - outermost, executed first
        .layer(middleware::from_fn(log_request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_builds_from_config() {
        let mut config = Config::with_overrides("./unused", 0);
        config.frontend_origins = vec!["http://localhost:5173".into(), "bad\norigin".into()];
        let _ = cors_layer(&config);

        config.allow_all_origins = true;
        let _ = cors_layer(&config);
    }
}
