//! 请求体提取器
//!
//! 结账页和扫码枪有时不带 `Content-Type`，或在缺参时发送空 body。
//! [`JsonBody`] 把空 body 视为默认值 (所有字段缺失)，交给 handler 的
//! 必填校验返回 `RequiredField`；其它解析失败同样以 [`AppError`] 信封返回。

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::{AppError, ErrorCode};

/// 宽松的 JSON 请求体
///
/// - 不检查 `Content-Type`
/// - 空 body (或仅空白) → `T::default()`
/// - 非法 JSON → 400 `InvalidRequest`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::with_message(ErrorCode::InvalidRequest, e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidRequest, format!("Invalid JSON body: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::models::ScanRequest;

    async fn extract(body: &'static str) -> Result<ScanRequest, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/api/scan")
            .body(Body::from(body))
            .unwrap();
        JsonBody::<ScanRequest>::from_request(req, &()).await.map(|b| b.0)
    }

    #[tokio::test]
    async fn test_empty_body_is_default() {
        let req = extract("").await.unwrap();
        assert!(req.cart_id.is_none());
        assert!(req.barcode.is_none());

        let req = extract("  \n").await.unwrap();
        assert!(req.cart_id.is_none());
    }

    #[tokio::test]
    async fn test_parses_without_content_type() {
        let req = extract(r#"{"cartId":"C1","barcode":"A1"}"#).await.unwrap();
        assert_eq!(req.cart_id.as_deref(), Some("C1"));
        assert_eq!(req.barcode.as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_request() {
        let err = extract("{not json").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }
}
