//! 支付编排服务
//!
//! 支付流水是关键写入 (同步落库，失败返回 500)；小票是非关键路径。

use std::sync::Arc;

use chrono::Utc;
use shared::models::{
    CashPaymentRequest, CashPaymentResponse, CreateOrderRequest, CreateOrderResponse,
    TransactionAction, VerifyPaymentRequest, VerifyPaymentResponse, sentinel,
};

use super::gateway::{OrderNotes, OrderRequest, RazorpayClient};
use super::{GatewayError, PaymentError, signature};
use crate::core::Config;
use crate::ledger::LedgerService;
use crate::receipt::{self, Receipt, ReceiptMailer};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_ID_LEN, MAX_SHORT_TEXT_LEN, MAX_SIGNATURE_LEN, missing_fields, non_blank,
    validate_amount, validate_len,
};
use crate::utils::{AppError, AppResult, money};

const DEFAULT_ONLINE_METHOD: &str = "ONLINE";
const DEFAULT_CASH_METHOD: &str = "CASH";

/// 支付服务
#[derive(Clone, Debug)]
pub struct PaymentService {
    gateway: Option<RazorpayClient>,
    key_secret: Option<String>,
    currency: String,
    ledger: Arc<LedgerService>,
    mailer: Option<Arc<ReceiptMailer>>,
}

impl PaymentService {
    pub fn new(
        gateway: Option<RazorpayClient>,
        key_secret: Option<String>,
        currency: impl Into<String>,
        ledger: Arc<LedgerService>,
    ) -> Self {
        Self {
            gateway,
            key_secret,
            currency: currency.into(),
            ledger,
            mailer: None,
        }
    }

    /// 按配置创建；网关凭据不全时网关路径关闭
    pub fn from_config(config: &Config, ledger: Arc<LedgerService>) -> Result<Self, GatewayError> {
        let gateway = match (&config.razorpay_key_id, &config.razorpay_key_secret) {
            (Some(id), Some(secret)) => Some(RazorpayClient::new(
                id.clone(),
                secret.clone(),
                config.razorpay_api_base.clone(),
            )?),
            _ => None,
        };
        let key_secret = gateway
            .as_ref()
            .and(config.razorpay_key_secret.clone());

        Ok(Self::new(
            gateway,
            key_secret,
            config.payment_currency.clone(),
            ledger,
        ))
    }

    pub fn with_mailer(mut self, mailer: Option<Arc<ReceiptMailer>>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn gateway_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    /// 创建网关订单
    ///
    /// 先检查网关是否配置，再校验字段；网关调用失败返回 500
    pub async fn create_order(&self, req: CreateOrderRequest) -> AppResult<CreateOrderResponse> {
        let gateway = self.gateway.as_ref().ok_or(PaymentError::NotConfigured)?;

        let amount_field = req.amount.map(|a| a.to_string());
        let missing = missing_fields(&[
            ("amount", amount_field.as_deref()),
            ("cartId", req.cart_id.as_deref()),
            ("email", req.email.as_deref()),
            ("phone", req.phone.as_deref()),
        ]);
        let (Some(amount), Some(cart_id), Some(email), Some(phone), true) = (
            req.amount,
            non_blank(req.cart_id.as_deref()),
            non_blank(req.email.as_deref()),
            non_blank(req.phone.as_deref()),
            missing.is_empty(),
        ) else {
            return Err(AppError::required(&missing, "Missing required fields"));
        };

        validate_len(cart_id, "cartId", MAX_ID_LEN)?;
        validate_len(email, "email", MAX_EMAIL_LEN)?;
        validate_len(phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_amount(amount)?;
        let amount_minor =
            money::to_minor_units(amount).ok_or(PaymentError::InvalidAmount(amount))?;

        let order = OrderRequest {
            amount: amount_minor,
            currency: &self.currency,
            receipt: cart_id,
            notes: OrderNotes {
                cart_id,
                email,
                phone,
            },
        };
        let order_id = gateway.create_order(&order).await.map_err(|e| {
            tracing::error!(cart_id = %cart_id, error = %e, "Failed to create gateway order");
            PaymentError::Gateway(e)
        })?;

        tracing::info!(
            cart_id = %cart_id,
            order_id = %order_id,
            amount_minor,
            "💳 Gateway order created"
        );

        Ok(CreateOrderResponse {
            order_id,
            key: gateway.key_id().to_string(),
            amount: amount_minor,
            currency: self.currency.clone(),
        })
    }

    /// 校验网关支付签名并记录支付完成
    ///
    /// 网关路径只记录事件，流水金额为 0
    pub async fn verify_payment(
        &self,
        req: VerifyPaymentRequest,
    ) -> AppResult<VerifyPaymentResponse> {
        let secret = self
            .key_secret
            .as_deref()
            .ok_or(PaymentError::NotConfigured)?;

        let order_id = req.order_id.as_deref().map(str::trim).unwrap_or_default();
        let payment_id = req.payment_id.as_deref().map(str::trim).unwrap_or_default();
        let sig = req.signature.as_deref().map(str::trim).unwrap_or_default();
        validate_len(order_id, "orderId", MAX_SHORT_TEXT_LEN)?;
        validate_len(payment_id, "paymentId", MAX_SHORT_TEXT_LEN)?;
        validate_len(sig, "signature", MAX_SIGNATURE_LEN)?;

        if let Err(e) = signature::verify(secret, order_id, payment_id, sig) {
            tracing::warn!(
                order_id = %order_id,
                payment_id = %payment_id,
                reason = %e,
                "Payment signature rejected"
            );
            return Err(PaymentError::Signature(e).into());
        }

        self.ledger
            .record(TransactionAction::Add, sentinel::PAYMENT_COMPLETED, 0.0)
            .await
            .map_err(PaymentError::from)?;

        let cart_id = non_blank(req.cart_id.as_deref()).unwrap_or("-");
        tracing::info!(
            cart_id = %cart_id,
            order_id = %order_id,
            payment_id = %payment_id,
            "✅ Gateway payment verified"
        );

        self.send_receipt(
            req.email.as_deref(),
            cart_id,
            req.items,
            req.total.unwrap_or_default(),
            non_blank(req.payment_method.as_deref()).unwrap_or(DEFAULT_ONLINE_METHOD),
            payment_id,
        );

        Ok(VerifyPaymentResponse {
            success: true,
            payment_id: payment_id.to_string(),
        })
    }

    /// 现金支付：直接记录实收金额
    pub async fn cash_payment(&self, req: CashPaymentRequest) -> AppResult<CashPaymentResponse> {
        let amount_field = req.amount.map(|a| a.to_string());
        let missing = missing_fields(&[
            ("amount", amount_field.as_deref()),
            ("cartId", req.cart_id.as_deref()),
        ]);
        let (Some(amount), Some(cart_id), true) = (
            req.amount,
            non_blank(req.cart_id.as_deref()),
            missing.is_empty(),
        ) else {
            return Err(AppError::required(&missing, "Missing required fields"));
        };
        validate_len(cart_id, "cartId", MAX_ID_LEN)?;
        validate_amount(amount)?;

        let amount = money::to_f64(money::to_decimal(amount));
        let entry = self
            .ledger
            .record(TransactionAction::Add, sentinel::CASH_PAYMENT, amount)
            .await
            .map_err(PaymentError::from)?;

        tracing::info!(
            cart_id = %cart_id,
            amount,
            transaction_id = entry.id,
            "💵 Cash payment recorded"
        );

        self.send_receipt(
            req.email.as_deref(),
            cart_id,
            req.items,
            amount,
            non_blank(req.payment_method.as_deref()).unwrap_or(DEFAULT_CASH_METHOD),
            &entry.id.to_string(),
        );

        Ok(CashPaymentResponse {
            success: true,
            transaction_id: entry.id,
        })
    }

    fn send_receipt(
        &self,
        email: Option<&str>,
        cart_id: &str,
        items: Vec<shared::models::PaymentItem>,
        total: f64,
        method: &str,
        reference: &str,
    ) {
        if receipt::is_walk_in(email) {
            return;
        }
        let Some(email) = non_blank(email) else {
            return;
        };
        receipt::dispatch(
            self.mailer.clone(),
            Receipt {
                email: email.to_string(),
                cart_id: cart_id.to_string(),
                items,
                total,
                method: method.to_string(),
                reference: reference.to_string(),
                issued_at: Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::utils::ErrorCode;
    use shared::models::PaymentItem;

    const SECRET: &str = "rzp_secret";

    async fn setup(
        gateway: bool,
    ) -> (tempfile::TempDir, PaymentService, Arc<LedgerService>) {
        setup_with_api(gateway.then_some("http://127.0.0.1:9/v1")).await
    }

    async fn setup_with_api(
        api_base: Option<&str>,
    ) -> (tempfile::TempDir, PaymentService, Arc<LedgerService>) {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::new(tmp.path()).await.unwrap().db;
        let (ledger, _rx) = LedgerService::new(db, 8);
        let client =
            api_base.map(|base| RazorpayClient::new("rzp_test_key", SECRET, base).unwrap());
        let secret = api_base.map(|_| SECRET.to_string());
        let service = PaymentService::new(client, secret, "INR", ledger.clone());
        (tmp, service, ledger)
    }

    type SeenOrders = Arc<parking_lot::Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    /// 本地网关桩：`/v1/orders` 返回订单 id，`/denied/orders` 返回 401
    async fn spawn_gateway_stub() -> (String, SeenOrders) {
        use axum::routing::post;

        let seen: SeenOrders = Arc::default();
        let captured = seen.clone();
        let app = axum::Router::new()
            .route(
                "/v1/orders",
                post(
                    move |headers: http::HeaderMap,
                          axum::Json(body): axum::Json<serde_json::Value>| {
                        let captured = captured.clone();
                        async move {
                            let auth = headers
                                .get(http::header::AUTHORIZATION)
                                .and_then(|v| v.to_str().ok())
                                .map(String::from);
                            captured.lock().push((auth, body));
                            axum::Json(serde_json::json!({"id": "order_x", "entity": "order"}))
                        }
                    },
                ),
            )
            .route(
                "/denied/orders",
                post(|| async {
                    (
                        http::StatusCode::UNAUTHORIZED,
                        axum::Json(serde_json::json!({
                            "error": {"code": "BAD_REQUEST_ERROR", "description": "Authentication failed"}
                        })),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    fn order_request() -> CreateOrderRequest {
        CreateOrderRequest {
            amount: Some(120.5),
            cart_id: Some("C1".into()),
            email: Some("a@b.c".into()),
            phone: Some("999".into()),
        }
    }

    fn verify_request(order_id: &str, payment_id: &str, sig: &str) -> VerifyPaymentRequest {
        VerifyPaymentRequest {
            order_id: Some(order_id.into()),
            payment_id: Some(payment_id.into()),
            signature: Some(sig.into()),
            cart_id: Some("C1".into()),
            email: Some("walk-in".into()),
            items: vec![PaymentItem {
                barcode: Some("A1".into()),
                name: "Bread".into(),
                price: 40.0,
                quantity: 1,
            }],
            total: Some(40.0),
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn test_create_order_requires_gateway() {
        let (_tmp, payments, _ledger) = setup(false).await;
        assert!(!payments.gateway_enabled());

        let err = payments
            .create_order(CreateOrderRequest {
                amount: Some(100.0),
                cart_id: Some("C1".into()),
                email: Some("a@b.c".into()),
                phone: Some("999".into()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentGatewayNotConfigured);
    }

    #[tokio::test]
    async fn test_create_order_against_gateway() {
        let (base, seen) = spawn_gateway_stub().await;
        let (_tmp, payments, ledger) = setup_with_api(Some(&format!("{base}/v1"))).await;

        let resp = payments.create_order(order_request()).await.unwrap();
        assert_eq!(resp.order_id, "order_x");
        assert_eq!(resp.key, "rzp_test_key");
        assert_eq!(resp.amount, 12050);
        assert_eq!(resp.currency, "INR");

        let (auth, body) = {
            let seen = seen.lock();
            assert_eq!(seen.len(), 1);
            seen[0].clone()
        };
        assert!(auth.as_deref().unwrap().starts_with("Basic "));
        assert_eq!(body["amount"], 12050);
        assert_eq!(body["currency"], "INR");
        assert_eq!(body["receipt"], "C1");
        assert_eq!(body["notes"]["email"], "a@b.c");

        // 建单不写流水
        assert!(ledger.list_all(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_order_gateway_rejection_is_500() {
        let (base, _seen) = spawn_gateway_stub().await;
        let (_tmp, payments, _ledger) = setup_with_api(Some(&format!("{base}/denied"))).await;

        let err = payments.create_order(order_request()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentGatewayError);
        assert_eq!(err.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_order_missing_fields() {
        let (_tmp, payments, _ledger) = setup(true).await;
        let err = payments
            .create_order(CreateOrderRequest {
                amount: Some(100.0),
                cart_id: Some("C1".into()),
                email: None,
                phone: Some("  ".into()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let fields = &err.details.unwrap()["fields"];
        assert_eq!(fields, &serde_json::json!(["email", "phone"]));
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_amount() {
        let (_tmp, payments, _ledger) = setup(true).await;
        let err = payments
            .create_order(CreateOrderRequest {
                amount: Some(-5.0),
                cart_id: Some("C1".into()),
                email: Some("a@b.c".into()),
                phone: Some("999".into()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentInvalidAmount);
    }

    #[tokio::test]
    async fn test_verify_requires_secret() {
        let (_tmp, payments, ledger) = setup(false).await;
        let err = payments
            .verify_payment(verify_request("order_1", "pay_1", "00"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentGatewayNotConfigured);
        assert!(ledger.list_all(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verify_rejects_mismatch_without_side_effects() {
        let (_tmp, payments, ledger) = setup(true).await;
        let wrong = signature::sign("other", "order_1", "pay_1").unwrap();

        let err = payments
            .verify_payment(verify_request("order_1", "pay_1", &wrong))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentSignatureInvalid);

        let err = payments
            .verify_payment(VerifyPaymentRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentSignatureInvalid);

        assert!(ledger.list_all(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verify_records_payment_completed_at_zero() {
        let (_tmp, payments, ledger) = setup(true).await;
        let sig = signature::sign(SECRET, "order_1", "pay_1").unwrap();

        let resp = payments
            .verify_payment(verify_request("order_1", "pay_1", &sig))
            .await
            .unwrap();
        assert!(resp.success);
        assert_eq!(resp.payment_id, "pay_1");

        let all = ledger.list_all(true).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].action, TransactionAction::Add);
        assert_eq!(all[0].item, "PAYMENT_COMPLETED");
        assert_eq!(all[0].price, 0.0);
    }

    #[tokio::test]
    async fn test_verify_accepts_items_without_names() {
        let (_tmp, payments, ledger) = setup(true).await;
        let sig = signature::sign(SECRET, "order_2", "pay_2").unwrap();
        let req: VerifyPaymentRequest = serde_json::from_value(serde_json::json!({
            "razorpay_order_id": "order_2",
            "razorpay_payment_id": "pay_2",
            "razorpay_signature": sig,
            "cartId": "C1",
            "email": "walk-in",
            "items": [{"barcode": "A1", "price": 40}]
        }))
        .unwrap();

        let resp = payments.verify_payment(req).await.unwrap();
        assert!(resp.success);
        assert_eq!(ledger.list_all(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cash_payment_records_amount() {
        let (_tmp, payments, ledger) = setup(false).await;

        let resp = payments
            .cash_payment(CashPaymentRequest {
                amount: Some(100.0),
                cart_id: Some("C2".into()),
                email: Some("shopper@example.com".into()),
                items: vec![],
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(resp.success);

        let all = ledger.list_all(true).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, resp.transaction_id);
        assert_eq!(all[0].item, "CASH_PAYMENT");
        assert_eq!(all[0].price, 100.0);
    }

    #[tokio::test]
    async fn test_cash_payment_missing_fields() {
        let (_tmp, payments, ledger) = setup(false).await;

        let err = payments
            .cash_payment(CashPaymentRequest {
                amount: Some(100.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap()["fields"], serde_json::json!(["cartId"]));
        assert!(ledger.list_all(true).await.unwrap().is_empty());
    }
}
