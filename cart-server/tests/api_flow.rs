//! HTTP 接口集成测试：临时目录中的 RocksDB + Router oneshot

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use cart_server::{Config, ServerState};

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: u64,
}

const INVENTORY: &str = "barcode,name,category,price\nA1,Bread,Bakery,40\nB2,Milk,Dairy,25\n";

struct TestApp {
    _tmp: tempfile::TempDir,
    state: ServerState,
    app: Router,
}

async fn setup() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let inventory_path = tmp.path().join("inventory.csv");
    std::fs::write(&inventory_path, INVENTORY).unwrap();

    let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    config.inventory_path = inventory_path.to_string_lossy().into_owned();

    let state = ServerState::initialize(&config).await.unwrap();
    let app = cart_server::api::build_app(state.clone());
    TestApp {
        _tmp: tmp,
        state,
        app,
    }
}

impl TestApp {
    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call("GET", uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call("POST", uri, Some(body)).await
    }

    /// 不带 Content-Type 的原始请求体
    async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

#[tokio::test]
async fn test_banner_and_health() {
    let app = setup().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("running"));

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["inventoryCount"], 2);
    assert_eq!(body["activeCarts"], 0);
    assert_eq!(body["gatewayEnabled"], false);
}

#[tokio::test]
async fn test_scan_and_remove_scenario() {
    let app = setup().await;

    let (status, cart) = app.get("/api/cart/C1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], 0.0);

    let (status, cart) = app
        .post("/api/scan", json!({"cartId": "C1", "barcode": "A1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["barcode"], "A1");
    assert_eq!(cart["items"][0]["quantity"], 1);
    assert_eq!(cart["total"], 40.0);

    let (_, cart) = app
        .post("/api/scan", json!({"cartId": "C1", "barcode": "A1"}))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["total"], 80.0);

    let (status, cart) = app.post("/api/cart/C1/remove", json!({"barcode": "A1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 1);
    assert_eq!(cart["total"], 40.0);

    let (_, cart) = app.post("/api/cart/C1/remove", json!({"barcode": "A1"})).await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], 0.0);

    // 不在购物车中的条码：原样返回
    let (status, cart) = app.post("/api/cart/C1/remove", json!({"barcode": "B2"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_unknown_barcode_is_404_and_does_not_mutate() {
    let app = setup().await;

    let (status, body) = app
        .post("/api/scan", json!({"cartId": "C1", "barcode": "ZZZ"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    assert_eq!(body["details"]["barcode"], "ZZZ");

    let (_, cart) = app.get("/api/cart/C1").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], 0.0);
}

#[tokio::test]
async fn test_scan_missing_fields_is_400() {
    let app = setup().await;

    let (status, body) = app.post("/api/scan", json!({"cartId": "C1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing cartId or barcode");
    assert_eq!(body["details"]["fields"], json!(["barcode"]));

    let (status, _) = app.post("/api/scan", json!({"cartId": " ", "barcode": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 校验失败不创建会话
    assert_eq!(app.state.carts.active_count(), 0);
}

#[tokio::test]
async fn test_bodyless_requests_get_error_envelope() {
    let app = setup().await;

    for uri in ["/api/pay", "/api/verify"] {
        let (status, body) = app.call("POST", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Missing cartId");
        assert_eq!(body["details"]["fields"], json!(["cartId"]));
    }

    let (status, body) = app.post_raw("/api/scan", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["fields"], json!(["cartId", "barcode"]));

    // 缺少 Content-Type 也按 JSON 解析
    let (status, cart) = app
        .post_raw("/api/scan", r#"{"cartId":"C1","barcode":"A1"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total"], 40.0);

    let (status, body) = app.post_raw("/api/pay", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_verify_requires_payment() {
    let app = setup().await;
    app.post("/api/scan", json!({"cartId": "C1", "barcode": "B2"}))
        .await;

    let (status, body) = app.post("/api/verify", json!({"cartId": "C1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Payment not completed");
    assert_eq!(body["details"]["cart"]["cartId"], "C1");
    assert_eq!(body["details"]["cart"]["total"], 25.0);
    assert_eq!(body["details"]["cart"]["verifiedStatus"], false);

    let (status, body) = app.post("/api/pay", json!({"cartId": "C1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["cart"]["paymentStatus"], true);

    let (status, body) = app.post("/api/verify", json!({"cartId": "C1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["verifiedStatus"], true);

    let (status, _) = app.post("/api/pay", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cash_payment_writes_ledger_row() {
    let app = setup().await;

    let (status, body) = app
        .post(
            "/api/payment/cash",
            json!({"amount": 100, "cartId": "C2", "email": "walk-in", "items": [], "paymentMethod": "CASH"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let tx_id = body["transactionId"].as_i64().unwrap();

    let (status, list) = app.get("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], tx_id);
    assert_eq!(rows[0]["action"], "ADD");
    assert_eq!(rows[0]["item"], "CASH_PAYMENT");
    assert_eq!(rows[0]["price"], 100.0);

    let (_, stats) = app.get("/api/transactions/stats").await;
    assert_eq!(stats["totalRevenue"], 100.0);
    assert_eq!(stats["activeOrders"], 1);
}

#[tokio::test]
async fn test_cash_payment_missing_fields() {
    let app = setup().await;

    let (status, body) = app.post("/api/payment/cash", json!({"amount": 100})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["fields"], json!(["cartId"]));

    let (_, list) = app.get("/api/transactions").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_gateway_paths_without_credentials() {
    let app = setup().await;

    let (status, body) = app
        .post(
            "/api/payment/create-order",
            json!({"amount": 100, "cartId": "C1", "email": "a@b.c", "phone": "999"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Payment gateway not configured");

    let (status, _) = app
        .post(
            "/api/payment/verify",
            json!({"razorpay_order_id": "o", "razorpay_payment_id": "p", "razorpay_signature": "00"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bill_reset() {
    let app = setup().await;

    let (status, bill) = app.get("/api/bill").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["total"], 0.0);

    let (status, body) = app.post("/api/bill/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, list) = app.get("/api/transactions").await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["action"], "RESET");
    assert_eq!(rows[0]["item"], "-");

    let mut res = app
        .state
        .db
        .query("SELECT count() AS total FROM bill GROUP ALL")
        .await
        .unwrap();
    let count: Option<CountRow> = res.take(0).unwrap();
    assert_eq!(count.unwrap().total, 1);
}

#[tokio::test]
async fn test_inventory_list_and_reload() {
    let app = setup().await;

    let (status, body) = app.get("/api/inventory").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["products"][0]["barcode"], "A1");

    std::fs::write(
        &app.state.config.inventory_path,
        "barcode,name,category,price\nC3,Eggs,Dairy,72\n",
    )
    .unwrap();

    let (status, body) = app.post("/api/inventory/reload", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Loaded 1 products");

    let (status, _) = app
        .post("/api/scan", json!({"cartId": "C1", "barcode": "A1"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discard_cart_session() {
    let app = setup().await;
    app.get("/api/cart/C9").await;

    let (status, body) = app.call("DELETE", "/api/cart/C9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["existed"], true);

    let (_, body) = app.call("DELETE", "/api/cart/C9", None).await;
    assert_eq!(body["existed"], false);
}
