//! Bill Model

use serde::{Deserialize, Serialize};

/// Running bill total (single logical instance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub total: f64,
    /// Last reset / creation time (Unix millis)
    pub updated_at: i64,
}

/// POST /api/bill/reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillReset {
    pub success: bool,
    pub message: String,
}
