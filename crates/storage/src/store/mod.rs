#![forbid(unsafe_code)]

mod comments;
mod error;
mod notifications;
mod progress;
mod requests;
mod taxonomy;
mod templates;
mod types;

pub use error::StoreError;
pub use progress::DealCounts;
pub use types::*;

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE: &str = "dealroom.db";
const SCHEMA_VERSION: &str = "v1";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        let mut store = Self { conn, storage_dir };
        store.seed_default_taxonomy()?;
        Ok(store)
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
          name TEXT PRIMARY KEY,
          value INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL UNIQUE,
          icon TEXT NOT NULL,
          color TEXT NOT NULL,
          order_index INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS subcategories (
          id TEXT PRIMARY KEY,
          category_id TEXT NOT NULL REFERENCES categories(id),
          name TEXT NOT NULL,
          order_index INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS templates (
          id TEXT PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT,
          industry TEXT,
          deal_type TEXT,
          template_data_json TEXT NOT NULL,
          is_default INTEGER NOT NULL,
          created_by TEXT,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS requests (
          id TEXT PRIMARY KEY,
          revision INTEGER NOT NULL,
          deal_id TEXT NOT NULL,
          category_id TEXT NOT NULL REFERENCES categories(id),
          subcategory_id TEXT,
          title TEXT NOT NULL,
          description TEXT,
          priority TEXT NOT NULL,
          status TEXT NOT NULL,
          assignee_ids_json TEXT NOT NULL,
          reviewer_ids_json TEXT NOT NULL,
          document_ids_json TEXT NOT NULL,
          due_date TEXT,
          completion_date_ms INTEGER,
          notes TEXT,
          order_index INTEGER NOT NULL,
          risk_score REAL,
          stage TEXT,
          created_by TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          updated_by TEXT,
          last_activity_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS comments (
          id TEXT PRIMARY KEY,
          request_id TEXT NOT NULL,
          user_id TEXT NOT NULL,
          content TEXT NOT NULL,
          comment_type TEXT NOT NULL,
          parent_comment_id TEXT,
          approved_by TEXT,
          approved_at_ms INTEGER,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notifications (
          id TEXT PRIMARY KEY,
          user_id TEXT NOT NULL,
          request_id TEXT NOT NULL,
          deal_id TEXT,
          kind TEXT NOT NULL,
          title TEXT NOT NULL,
          message TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          read INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_subcategories_category ON subcategories(category_id, order_index);
        CREATE INDEX IF NOT EXISTS idx_requests_deal ON requests(deal_id, order_index);
        CREATE INDEX IF NOT EXISTS idx_comments_request ON comments(request_id, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, created_at_ms);
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}

pub(crate) fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}

pub(crate) fn next_counter_tx(tx: &Transaction<'_>, name: &str) -> Result<i64, StoreError> {
    let current: i64 = tx
        .query_row(
            "SELECT value FROM counters WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}

pub(crate) fn encode_id_set(ids: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(ids)?)
}

pub(crate) fn decode_id_set(raw: &str) -> Result<Vec<String>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}
