#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError};
use super::super::types::RequestRow;
use super::{REQUEST_COLUMNS, fetch_request, into_request_row, map_raw_request};
use rusqlite::params;

impl SqliteStore {
    pub fn get_request(&self, id: &str) -> Result<Option<RequestRow>, StoreError> {
        fetch_request(&self.conn, id)
    }

    /// Requests for one deal, or every request when no deal is given,
    /// ordered by board position then id.
    pub fn list_requests(&self, deal_id: Option<&str>) -> Result<Vec<RequestRow>, StoreError> {
        let raws = match deal_id {
            Some(deal_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {REQUEST_COLUMNS} FROM requests WHERE deal_id = ?1 \
                     ORDER BY order_index ASC, id ASC"
                ))?;
                let rows = stmt.query_map(params![deal_id], map_raw_request)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {REQUEST_COLUMNS} FROM requests ORDER BY deal_id ASC, order_index ASC, id ASC"
                ))?;
                let rows = stmt.query_map([], map_raw_request)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        raws.into_iter().map(into_request_row).collect()
    }
}
