#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError, next_counter_tx, now_ms};
use super::types::{NewNotification, NotificationRow};
use rusqlite::params;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, request_id, deal_id, kind, title, message, created_at_ms, read";

fn map_notification(row: &rusqlite::Row<'_>) -> rusqlite::Result<NotificationRow> {
    Ok(NotificationRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        request_id: row.get(2)?,
        deal_id: row.get(3)?,
        kind: row.get(4)?,
        title: row.get(5)?,
        message: row.get(6)?,
        created_at_ms: row.get(7)?,
        read: row.get::<_, i64>(8)? != 0,
    })
}

impl SqliteStore {
    /// Write one trigger's worth of notifications as a single batch. The
    /// batch commits or fails as a whole; the caller decides what a failure
    /// means for the already-committed primary mutation.
    pub fn insert_notifications(
        &mut self,
        batch: &[NewNotification],
    ) -> Result<usize, StoreError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        for notification in batch {
            let seq = next_counter_tx(&tx, "notification_seq")?;
            let id = format!("NTF-{seq:06}");
            tx.execute(
                r#"
                INSERT INTO notifications(
                  id, user_id, request_id, deal_id, kind, title, message, created_at_ms, read
                )
                VALUES (?1,?2,?3,?4,?5,?6,?7,?8,0)
                "#,
                params![
                    id,
                    notification.user_id,
                    notification.request_id,
                    notification.deal_id,
                    notification.kind,
                    notification.title,
                    notification.message,
                    now
                ],
            )?;
        }

        tx.commit()?;
        Ok(batch.len())
    }

    pub fn list_notifications(&self, user_id: &str) -> Result<Vec<NotificationRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = ?1 \
             ORDER BY created_at_ms DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![user_id], map_notification)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1",
            params![id],
        )?;
        tx.commit()?;
        Ok(updated > 0)
    }
}
