#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError, next_counter_tx, now_ms};
use super::types::{CommentRow, NewComment};
use dd_core::model::CommentKind;
use rusqlite::{Connection, OptionalExtension, params};

const COMMENT_COLUMNS: &str = "id, request_id, user_id, content, comment_type, \
     parent_comment_id, approved_by, approved_at_ms, created_at_ms, updated_at_ms";

fn map_comment(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        request_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        comment_type: row.get(4)?,
        parent_comment_id: row.get(5)?,
        approved_by: row.get(6)?,
        approved_at_ms: row.get(7)?,
        created_at_ms: row.get(8)?,
        updated_at_ms: row.get(9)?,
    })
}

fn fetch_comment(conn: &Connection, id: &str) -> Result<Option<CommentRow>, StoreError> {
    Ok(conn
        .query_row(
            &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1"),
            params![id],
            map_comment,
        )
        .optional()?)
}

impl SqliteStore {
    pub fn insert_comment(&mut self, new: NewComment) -> Result<CommentRow, StoreError> {
        if new.content.trim().is_empty() {
            return Err(StoreError::InvalidInput("content is required"));
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        let request_exists = tx
            .query_row(
                "SELECT 1 FROM requests WHERE id = ?1",
                params![new.request_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !request_exists {
            return Err(StoreError::UnknownId);
        }

        let seq = next_counter_tx(&tx, "comment_seq")?;
        let id = format!("CMT-{seq:04}");

        let (comment_type, approved_by, approved_at_ms) = if new.approve {
            (
                CommentKind::Approved.as_str(),
                Some(new.user_id.clone()),
                Some(now),
            )
        } else {
            (CommentKind::Internal.as_str(), None, None)
        };

        tx.execute(
            r#"
            INSERT INTO comments(
              id, request_id, user_id, content, comment_type, parent_comment_id,
              approved_by, approved_at_ms, created_at_ms, updated_at_ms
            )
            VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)
            "#,
            params![
                id,
                new.request_id,
                new.user_id,
                new.content,
                comment_type,
                new.parent_comment_id,
                approved_by,
                approved_at_ms,
                now,
                now
            ],
        )?;

        // Comment activity is request activity.
        tx.execute(
            "UPDATE requests SET last_activity_at_ms = ?2 WHERE id = ?1",
            params![new.request_id, now],
        )?;

        tx.commit()?;

        Ok(CommentRow {
            id,
            request_id: new.request_id,
            user_id: new.user_id,
            content: new.content,
            comment_type: comment_type.to_string(),
            parent_comment_id: new.parent_comment_id,
            approved_by,
            approved_at_ms,
            created_at_ms: now,
            updated_at_ms: now,
        })
    }

    pub fn get_comment(&self, id: &str) -> Result<Option<CommentRow>, StoreError> {
        fetch_comment(&self.conn, id)
    }

    /// Promote to an approved answer. Sets `comment_type`, `approved_by`,
    /// and `approved_at` as a unit; content and threading stay untouched.
    pub fn approve_comment(
        &mut self,
        id: &str,
        approved_by: &str,
    ) -> Result<CommentRow, StoreError> {
        let now = now_ms();
        let tx = self.conn.transaction()?;

        let Some(mut comment) = fetch_comment(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };

        tx.execute(
            "UPDATE comments SET comment_type = ?2, approved_by = ?3, approved_at_ms = ?4 WHERE id = ?1",
            params![id, CommentKind::Approved.as_str(), approved_by, now],
        )?;

        tx.commit()?;

        comment.comment_type = CommentKind::Approved.as_str().to_string();
        comment.approved_by = Some(approved_by.to_string());
        comment.approved_at_ms = Some(now);
        Ok(comment)
    }

    /// Demote back to an internal comment, clearing approver and timestamp
    /// together.
    pub fn unapprove_comment(&mut self, id: &str) -> Result<CommentRow, StoreError> {
        let tx = self.conn.transaction()?;

        let Some(mut comment) = fetch_comment(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };

        tx.execute(
            "UPDATE comments SET comment_type = ?2, approved_by = NULL, approved_at_ms = NULL WHERE id = ?1",
            params![id, CommentKind::Internal.as_str()],
        )?;

        tx.commit()?;

        comment.comment_type = CommentKind::Internal.as_str().to_string();
        comment.approved_by = None;
        comment.approved_at_ms = None;
        Ok(comment)
    }

    pub fn update_comment_content(
        &mut self,
        id: &str,
        content: &str,
    ) -> Result<CommentRow, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::InvalidInput("content is required"));
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        let Some(mut comment) = fetch_comment(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };

        tx.execute(
            "UPDATE comments SET content = ?2, updated_at_ms = ?3 WHERE id = ?1",
            params![id, content, now],
        )?;

        tx.commit()?;

        comment.content = content.to_string();
        comment.updated_at_ms = now;
        Ok(comment)
    }

    pub fn delete_comment(&mut self, id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM comments WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    pub fn list_comments(&self, request_id: &str) -> Result<Vec<CommentRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE request_id = ?1 \
             ORDER BY created_at_ms ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![request_id], map_comment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Distinct users who have commented on the request, in order of their
    /// first comment.
    pub fn list_commenters(&self, request_id: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id
            FROM comments
            WHERE request_id = ?1
            GROUP BY user_id
            ORDER BY MIN(created_at_ms) ASC, MIN(id) ASC
            "#,
        )?;
        let rows = stmt.query_map(params![request_id], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
