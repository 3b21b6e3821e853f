//! 交易流水模块 — append-only 交易记录
//!
//! # 架构
//!
//! ```text
//! 扫码 / 移除商品 (非关键路径)
//!   └─ LedgerService::append() → mpsc → LedgerWorker → SurrealDB (ledger_entry 表)
//!
//! 支付确认 / 现金收款 / 账单重置 (关键路径)
//!   └─ LedgerService::record() → SurrealDB，失败直接返回给调用方
//! ```
//!
//! `append` 立即返回，写入结果只记录在日志里，不影响调用方的控制流。

pub mod service;
pub mod storage;
pub mod worker;

pub use service::{LedgerRequest, LedgerService, summarize};
pub use storage::{LedgerError, LedgerResult, LedgerStorage};
pub use worker::LedgerWorker;
