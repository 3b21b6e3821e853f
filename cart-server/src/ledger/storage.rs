//! 交易流水 SurrealDB 存储层
//!
//! Append-only 设计，没有任何删除/更新接口。

use serde::{Deserialize, Serialize};
use shared::models::{Transaction, TransactionAction};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// 存储错误
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger write failed: {0}")]
    Write(String),
    #[error("Ledger read failed: {0}")]
    Read(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Write(msg) => AppError::with_message(ErrorCode::LedgerWriteFailed, msg),
            LedgerError::Read(msg) => AppError::with_message(ErrorCode::LedgerReadFailed, msg),
        }
    }
}

/// SurrealDB 反序列化用（包含 SurrealDB record id）
#[derive(Debug, Clone, Deserialize)]
struct LedgerRecord {
    #[allow(dead_code)]
    id: surrealdb::RecordId,
    tx_id: i64,
    action: TransactionAction,
    item: String,
    price: f64,
    timestamp: i64,
}

impl From<LedgerRecord> for Transaction {
    fn from(r: LedgerRecord) -> Self {
        Transaction {
            id: r.tx_id,
            action: r.action,
            item: r.item,
            price: r.price,
            timestamp: r.timestamp,
        }
    }
}

/// 插入用结构（不含 SurrealDB id）
#[derive(Debug, Serialize)]
struct LedgerInsert {
    tx_id: i64,
    action: TransactionAction,
    item: String,
    price: f64,
    timestamp: i64,
}

/// 交易流水存储 (SurrealDB)
#[derive(Clone)]
pub struct LedgerStorage {
    db: Surreal<Db>,
}

impl std::fmt::Debug for LedgerStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStorage").finish_non_exhaustive()
    }
}

impl LedgerStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// 追加一条流水，时间戳与 id 在此分配
    pub async fn append(
        &self,
        action: TransactionAction,
        item: String,
        price: f64,
    ) -> LedgerResult<Transaction> {
        let entry = Transaction {
            id: shared::util::snowflake_id(),
            action,
            item,
            price,
            timestamp: shared::util::now_millis(),
        };

        // bind 需要 'static，传 owned
        let insert = LedgerInsert {
            tx_id: entry.id,
            action: entry.action,
            item: entry.item.clone(),
            price: entry.price,
            timestamp: entry.timestamp,
        };

        let mut res = self
            .db
            .query("CREATE ledger_entry CONTENT $data")
            .bind(("data", insert))
            .await
            .map_err(|e| LedgerError::Write(e.to_string()))?;
        let _: Vec<LedgerRecord> = res.take(0).map_err(|e| LedgerError::Write(e.to_string()))?;

        Ok(entry)
    }

    /// 全部流水，按时间排序 (同一毫秒内按 id)
    pub async fn list_all(&self, descending: bool) -> LedgerResult<Vec<Transaction>> {
        let sql = if descending {
            "SELECT * FROM ledger_entry ORDER BY timestamp DESC, tx_id DESC"
        } else {
            "SELECT * FROM ledger_entry ORDER BY timestamp ASC, tx_id ASC"
        };

        let mut res = self
            .db
            .query(sql)
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        let records: Vec<LedgerRecord> =
            res.take(0).map_err(|e| LedgerError::Read(e.to_string()))?;

        Ok(records.into_iter().map(Transaction::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn storage() -> (tempfile::TempDir, LedgerStorage) {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::new(tmp.path()).await.unwrap();
        (tmp, LedgerStorage::new(db.db))
    }

    #[tokio::test]
    async fn test_append_then_list() {
        let (_tmp, storage) = storage().await;

        let entry = storage
            .append(TransactionAction::Add, "Bread".into(), 40.0)
            .await
            .unwrap();
        assert_eq!(entry.item, "Bread");

        let all = storage.list_all(true).await.unwrap();
        assert_eq!(all, vec![entry]);
    }

    #[tokio::test]
    async fn test_list_order() {
        let (_tmp, storage) = storage().await;

        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            storage
                .append(TransactionAction::Add, name.to_string(), i as f64)
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(3)).await;
        }

        let desc: Vec<String> = storage
            .list_all(true)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.item)
            .collect();
        assert_eq!(desc, vec!["third", "second", "first"]);

        let asc: Vec<String> = storage
            .list_all(false)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.item)
            .collect();
        assert_eq!(asc, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_empty_ledger() {
        let (_tmp, storage) = storage().await;
        assert!(storage.list_all(true).await.unwrap().is_empty());
    }
}
