//! Transaction Ledger Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel item names written by the checkout and bill flows
pub mod sentinel {
    /// Gateway payment verified
    pub const PAYMENT_COMPLETED: &str = "PAYMENT_COMPLETED";
    /// Cash tendered at the counter
    pub const CASH_PAYMENT: &str = "CASH_PAYMENT";
    /// Bill reset marker
    pub const RESET: &str = "-";
}

/// Ledger action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionAction {
    Add,
    Remove,
    Reset,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
            Self::Reset => "RESET",
        };
        f.write_str(s)
    }
}

/// Ledger entry (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Snowflake id, also returned as the cash payment transaction id
    pub id: i64,
    pub action: TransactionAction,
    /// Product name or a [`sentinel`] value
    pub item: String,
    pub price: f64,
    /// Creation time (Unix millis)
    pub timestamp: i64,
}

/// Dashboard figures derived from the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Sum of `price` over ADD entries
    pub total_revenue: f64,
    /// Number of ledger entries
    pub total_transactions: usize,
    /// Number of ADD entries
    pub active_orders: usize,
}
