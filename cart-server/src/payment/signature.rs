//! Gateway payment signature (HMAC-SHA256)
//!
//! The gateway signs `"{order_id}|{payment_id}"` with the merchant secret and
//! hands the hex digest to the client, which forwards it to us.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Missing signature field: {0}")]
    MissingField(&'static str),
    #[error("Invalid signature hex")]
    InvalidHex,
    #[error("HMAC key error")]
    Key,
    #[error("Signature mismatch")]
    Mismatch,
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::Key)?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(mac)
}

/// Hex signature for `order_id|payment_id`
pub fn sign(secret: &str, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
    let mac = mac_for(secret, order_id, payment_id)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a client-supplied hex signature
///
/// Blank inputs are rejected before any HMAC work; comparison is constant time.
pub fn verify(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), SignatureError> {
    if secret.is_empty() {
        return Err(SignatureError::Key);
    }
    for (name, value) in [
        ("orderId", order_id),
        ("paymentId", payment_id),
        ("signature", signature),
    ] {
        if value.is_empty() {
            return Err(SignatureError::MissingField(name));
        }
    }

    let sig_bytes = hex::decode(signature).map_err(|_| SignatureError::InvalidHex)?;
    mac_for(secret, order_id, payment_id)?
        .verify_slice(&sig_bytes)
        .map_err(|_| SignatureError::Mismatch)
}
