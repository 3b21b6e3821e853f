//! Checkout / Payment DTOs
//!
//! Field names follow the web client: camelCase, except the gateway callback
//! fields which the checkout widget hands back as `razorpay_*`.

use serde::{Deserialize, Serialize};

/// Item line as sent by the checkout page (only used for receipts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentItem {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// POST /api/payment/create-order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: Option<f64>,
    pub cart_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Gateway order id
    pub order_id: String,
    /// Public gateway key for the client widget
    pub key: String,
    /// Amount in minor units (paise)
    pub amount: i64,
    pub currency: String,
}

/// POST /api/payment/verify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
    #[serde(alias = "razorpay_signature")]
    pub signature: Option<String>,
    pub cart_id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub items: Vec<PaymentItem>,
    pub total: Option<f64>,
    #[serde(alias = "method")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub payment_id: String,
}

/// POST /api/payment/cash
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPaymentRequest {
    pub amount: Option<f64>,
    pub cart_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub items: Vec<PaymentItem>,
    #[serde(alias = "method")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPaymentResponse {
    pub success: bool,
    /// Ledger transaction id
    pub transaction_id: i64,
}
