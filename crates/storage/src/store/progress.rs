#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use dd_core::model::RequestStatus;
use rusqlite::params;

/// Raw per-deal status counts; percentage math lives in `dd_core`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealCounts {
    pub deal_id: String,
    pub total: u64,
    pub completed: u64,
}

impl SqliteStore {
    pub fn deal_counts(&self, deal_id: &str) -> Result<DealCounts, StoreError> {
        let (total, completed) = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN status = ?2 THEN 1 ELSE 0 END), 0)
            FROM requests
            WHERE deal_id = ?1
            "#,
            params![deal_id, RequestStatus::Completed.as_str()],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        Ok(DealCounts {
            deal_id: deal_id.to_string(),
            total: total.max(0) as u64,
            completed: completed.max(0) as u64,
        })
    }

    /// One pass over every deal that has requests. Must agree with calling
    /// `deal_counts` once per deal.
    pub fn all_deal_counts(&self) -> Result<Vec<DealCounts>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT deal_id,
                   COUNT(*),
                   COALESCE(SUM(CASE WHEN status = ?1 THEN 1 ELSE 0 END), 0)
            FROM requests
            GROUP BY deal_id
            ORDER BY deal_id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![RequestStatus::Completed.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        let mut counts = Vec::new();
        for row in rows {
            let (deal_id, total, completed) = row?;
            counts.push(DealCounts {
                deal_id,
                total: total.max(0) as u64,
                completed: completed.max(0) as u64,
            });
        }
        Ok(counts)
    }
}
