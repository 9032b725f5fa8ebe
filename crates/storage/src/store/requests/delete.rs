#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError};
use rusqlite::params;

impl SqliteStore {
    /// Hard delete. Comments and notifications that reference the request
    /// are left in place; their fate is the caller's concern.
    pub fn delete_request(&mut self, id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM requests WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }
}
