//! Razorpay Orders via REST API (no SDK dependency)

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected order ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected gateway response: {0}")]
    Malformed(String),
}

/// `POST /orders` 请求体
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderRequest<'a> {
    /// 最小货币单位 (paise)
    pub amount: i64,
    pub currency: &'a str,
    pub receipt: &'a str,
    pub notes: OrderNotes<'a>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotes<'a> {
    pub cart_id: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

/// 网关客户端
#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    api_base: String,
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // secret 不进日志
        f.debug_struct("RazorpayClient")
            .field("key_id", &self.key_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl RazorpayClient {
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// 公钥 (下发给前端 checkout 组件)
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// 创建订单，返回网关订单 id
    pub async fn create_order(&self, order: &OrderRequest<'_>) -> Result<String, GatewayError> {
        let resp = self
            .http
            .post(format!("{}/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(order)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body: Value = resp.json().await?;
        parse_order_response(status, &body)
    }
}

/// 解析订单响应：2xx 取 `id`，否则取 `error.description`
pub(crate) fn parse_order_response(status: u16, body: &Value) -> Result<String, GatewayError> {
    if !(200..300).contains(&status) {
        let message = body["error"]["description"]
            .as_str()
            .unwrap_or("unknown error")
            .to_string();
        return Err(GatewayError::Rejected { status, message });
    }

    body["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .map(String::from)
        .ok_or_else(|| GatewayError::Malformed(body.to_string()))
}
