//! 账单总额
//!
//! 账单是单例：固定记录 `bill:main`，由记录 id 保证唯一。
//! 旧数据中可能残留的其它 `bill` 行在每次重置时删除 (只记 warn，不返回给调用方)。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{Bill, TransactionAction, sentinel};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::ledger::{LedgerError, LedgerService};
use crate::utils::{AppError, ErrorCode};

const BILL_TABLE: &str = "bill";
const BILL_KEY: &str = "main";

#[derive(Debug, Error)]
pub enum BillError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bill reset failed: {0}")]
    Reset(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<BillError> for AppError {
    fn from(err: BillError) -> Self {
        match err {
            BillError::Database(msg) => AppError::database(msg),
            BillError::Reset(msg) => AppError::with_message(ErrorCode::BillResetFailed, msg),
            BillError::Ledger(e) => e.into(),
        }
    }
}

pub type BillResult<T> = Result<T, BillError>;

/// SurrealDB 反序列化用
#[derive(Debug, Deserialize)]
struct BillRecord {
    #[allow(dead_code)]
    id: surrealdb::RecordId,
    total: f64,
    updated_at: i64,
}

impl From<BillRecord> for Bill {
    fn from(r: BillRecord) -> Self {
        Bill {
            total: r.total,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct BillContent {
    total: f64,
    updated_at: i64,
}

/// COUNT 结果
#[derive(Debug, Deserialize)]
struct CountResult {
    total: u64,
}

#[derive(Clone)]
pub struct BillService {
    db: Surreal<Db>,
    ledger: Arc<LedgerService>,
}

impl std::fmt::Debug for BillService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillService").finish_non_exhaustive()
    }
}

impl BillService {
    pub fn new(db: Surreal<Db>, ledger: Arc<LedgerService>) -> Self {
        Self { db, ledger }
    }

    /// 读取账单，不存在时以 total = 0 创建
    pub async fn get_or_create(&self) -> BillResult<Bill> {
        if let Some(existing) = self.select().await? {
            return Ok(existing.into());
        }

        let created: surrealdb::Result<Option<BillRecord>> = self
            .db
            .create((BILL_TABLE, BILL_KEY))
            .content(BillContent {
                total: 0.0,
                updated_at: shared::util::now_millis(),
            })
            .await;

        match created {
            Ok(Some(record)) => {
                tracing::info!("Bill created");
                Ok(record.into())
            }
            // 并发创建时另一方已写入，重新读取
            Ok(None) | Err(_) => self
                .select()
                .await?
                .map(Bill::from)
                .ok_or_else(|| BillError::Database("bill record missing after create".into())),
        }
    }

    async fn select(&self) -> BillResult<Option<BillRecord>> {
        self.db
            .select((BILL_TABLE, BILL_KEY))
            .await
            .map_err(|e| BillError::Database(e.to_string()))
    }

    /// 重置为 0，删除多余的账单行，然后写入 RESET 流水
    ///
    /// 完成后 `bill` 表恰好一行
    pub async fn reset(&self) -> BillResult<Bill> {
        let content = BillContent {
            total: 0.0,
            updated_at: shared::util::now_millis(),
        };

        let mut res = self
            .db
            .query(
                "SELECT count() AS total FROM bill WHERE id != bill:main GROUP ALL;
                 UPSERT bill:main CONTENT $data;
                 DELETE bill WHERE id != bill:main RETURN NONE;",
            )
            .bind(("data", content))
            .await
            .map_err(|e| BillError::Reset(e.to_string()))?;

        let duplicates: Option<CountResult> =
            res.take(0).map_err(|e| BillError::Reset(e.to_string()))?;
        let bill: Option<BillRecord> = res.take(1).map_err(|e| BillError::Reset(e.to_string()))?;
        let bill = bill.ok_or_else(|| BillError::Reset("upsert returned no record".into()))?;

        if let Some(CountResult { total }) = duplicates
            && total > 0
        {
            tracing::warn!(removed = total, "Duplicate bill rows found and removed");
        }

        self.ledger
            .record(TransactionAction::Reset, sentinel::RESET, 0.0)
            .await?;

        tracing::info!("🧾 Bill reset");
        Ok(bill.into())
    }
}
