//! 交易流水服务
//!
//! `LedgerService` 提供：
//! - 非关键写入（通过 mpsc 通道异步交给 worker，调用方立即返回）
//! - 关键写入（直接写入 SurrealDB，错误返回调用方）
//! - 查询与看板汇总

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use shared::models::{Transaction, TransactionAction, TransactionSummary};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::storage::{LedgerResult, LedgerStorage};
use super::worker::LedgerWorker;
use crate::utils::money;

/// 发送到 LedgerWorker 的写入请求
#[derive(Debug, Clone)]
pub struct LedgerRequest {
    pub action: TransactionAction,
    pub item: String,
    pub price: f64,
}

/// 交易流水服务
pub struct LedgerService {
    storage: LedgerStorage,
    tx: mpsc::Sender<LedgerRequest>,
    /// 已入队但尚未落库的条目数 (worker 写完后才减)
    in_flight: Arc<AtomicUsize>,
}

impl std::fmt::Debug for LedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerService")
            .field("capacity", &self.tx.capacity())
            .field("in_flight", &self.pending())
            .finish_non_exhaustive()
    }
}

impl LedgerService {
    /// 创建流水服务，返回的 Receiver 交给 [`Self::worker`] 创建的 worker
    pub fn new(
        db: Surreal<Db>,
        buffer_size: usize,
    ) -> (Arc<Self>, mpsc::Receiver<LedgerRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        let service = Arc::new(Self {
            storage: LedgerStorage::new(db),
            tx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        });
        (service, rx)
    }

    /// 存储层句柄
    pub fn storage(&self) -> LedgerStorage {
        self.storage.clone()
    }

    /// 消费本服务通道的 worker，与服务共享在途计数
    pub fn worker(&self) -> LedgerWorker {
        LedgerWorker::new(self.storage.clone(), self.in_flight.clone())
    }

    /// 非关键写入：入队后立即返回
    ///
    /// 通道已满或已关闭时只记录日志，条目被丢弃
    pub fn append(&self, action: TransactionAction, item: impl Into<String>, price: f64) {
        let req = LedgerRequest {
            action,
            item: item.into(),
            price,
        };
        // 先计数再入队，worker 不会在计数前减到负数
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let result = self.tx.try_send(req);
        if result.is_err() {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
        }
        match result {
            Ok(()) => {}
            Err(TrySendError::Full(req)) => {
                tracing::warn!(
                    action = %req.action,
                    item = %req.item,
                    "Ledger channel full, entry dropped"
                );
            }
            Err(TrySendError::Closed(req)) => {
                tracing::error!(
                    action = %req.action,
                    item = %req.item,
                    "Ledger worker stopped, entry dropped"
                );
            }
        }
    }

    /// 关键写入：等待落库，返回完整条目 (含 id)
    pub async fn record(
        &self,
        action: TransactionAction,
        item: impl Into<String>,
        price: f64,
    ) -> LedgerResult<Transaction> {
        let entry = self.storage.append(action, item.into(), price).await?;
        tracing::info!(
            tx_id = entry.id,
            action = %entry.action,
            item = %entry.item,
            price = entry.price,
            "Ledger entry recorded"
        );
        Ok(entry)
    }

    /// 已入队但尚未落库的条目数 (包括 worker 正在写的那一条)
    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 等待所有已入队条目落库 (关闭前调用)，超时返回 false
    pub async fn flush(&self, timeout: std::time::Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while self.pending() > 0 {
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(pending = self.pending(), "Ledger flush timed out");
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        true
    }

    /// 全部流水
    pub async fn list_all(&self, descending: bool) -> LedgerResult<Vec<Transaction>> {
        self.storage.list_all(descending).await
    }

    /// 看板汇总
    pub async fn summary(&self) -> LedgerResult<TransactionSummary> {
        let all = self.storage.list_all(true).await?;
        Ok(summarize(&all))
    }
}

/// 营收 = ADD 条目价格之和；订单数 = ADD 条目数；交易数 = 全部条目数
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    let adds: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.action == TransactionAction::Add)
        .collect();

    TransactionSummary {
        total_revenue: money::sum_amounts(adds.iter().map(|t| t.price)),
        total_transactions: transactions.len(),
        active_orders: adds.len(),
    }
}
