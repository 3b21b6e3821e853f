//! 交易流水后台 Worker
//!
//! 从 mpsc 通道消费 LedgerRequest，写入 SurrealDB。
//! 通道关闭时自动退出。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use super::service::LedgerRequest;
use super::storage::LedgerStorage;

/// 交易流水后台 Worker
///
/// 通过 [`super::LedgerService::worker`] 创建
pub struct LedgerWorker {
    storage: LedgerStorage,
    in_flight: Arc<AtomicUsize>,
}

impl LedgerWorker {
    pub(crate) fn new(storage: LedgerStorage, in_flight: Arc<AtomicUsize>) -> Self {
        Self { storage, in_flight }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: mpsc::Receiver<LedgerRequest>) {
        tracing::info!("📒 Ledger worker started");

        while let Some(req) = rx.recv().await {
            self.finish(req).await;
        }

        tracing::info!("Ledger channel closed, worker stopping");
    }

    /// 写入一条请求，写完 (无论成功与否) 才减少在途计数
    ///
    /// 写入失败只记录日志，不重试
    pub(crate) async fn finish(&self, req: LedgerRequest) {
        match self.storage.append(req.action, req.item, req.price).await {
            Ok(entry) => {
                tracing::debug!(
                    tx_id = entry.id,
                    action = %entry.action,
                    item = %entry.item,
                    "Ledger entry recorded"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to write ledger entry");
            }
        }
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
