//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) holding the durable records:
//!
//! | 表 | 内容 |
//! |----|------|
//! | `ledger_entry` | 交易流水 (append-only) |
//! | `bill` | 账单总额 (固定记录 `bill:main`) |
//!
//! 购物车会话只在内存中，不落库。

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

pub const NAMESPACE: &str = "smart_cart";
pub const DATABASE: &str = "pos";

/// Schema bootstrap, safe to run on every start
const SCHEMA: &str = "
DEFINE TABLE IF NOT EXISTS ledger_entry SCHEMALESS;
DEFINE INDEX IF NOT EXISTS ledger_entry_timestamp ON TABLE ledger_entry FIELDS timestamp;
DEFINE TABLE IF NOT EXISTS bill SCHEMALESS;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB store at `db_path` and apply the schema
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(db_path)
            .map_err(|e| AppError::database(format!("Failed to create database dir: {e}")))?;

        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self::bootstrap(db).await?;
        tracing::info!(path = %db_path.display(), "Database connection established (SurrealDB RocksDB)");
        Ok(service)
    }

    /// Select namespace/database and define tables on an already opened handle
    pub async fn bootstrap(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|r| r.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        Ok(Self { db })
    }
}
