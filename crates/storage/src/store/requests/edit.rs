#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError, encode_id_set, now_ms};
use super::super::types::{RequestPatch, RequestRow};
use super::{fetch_request, subcategory_exists};
use dd_core::model::RequestStatus;
use rusqlite::params;

impl SqliteStore {
    /// Full-row read-before-write update. The revision check is opt-in:
    /// `expected_revision = None` is last-writer-wins.
    pub fn edit_request(&mut self, patch: RequestPatch) -> Result<RequestRow, StoreError> {
        if !patch.has_changes() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        let Some(current) = fetch_request(&tx, &patch.id)? else {
            return Err(StoreError::UnknownId);
        };

        if let Some(expected) = patch.expected_revision
            && expected != current.revision
        {
            return Err(StoreError::RevisionMismatch {
                expected,
                actual: current.revision,
            });
        }

        if let Some(Some(subcategory_id)) = &patch.subcategory_id
            && !subcategory_exists(&tx, subcategory_id)?
        {
            return Err(StoreError::UnknownId);
        }

        let new_revision = current.revision + 1;
        let title = patch.title.unwrap_or(current.title);
        let description = patch.description.unwrap_or(current.description);
        let subcategory_id = patch.subcategory_id.unwrap_or(current.subcategory_id);
        let priority = patch.priority.unwrap_or(current.priority);
        let status = patch.status.unwrap_or_else(|| current.status.clone());
        let assignee_ids = patch.assignee_ids.unwrap_or(current.assignee_ids);
        let reviewer_ids = patch.reviewer_ids.unwrap_or(current.reviewer_ids);
        let document_ids = patch.document_ids.unwrap_or(current.document_ids);
        let due_date = patch.due_date.unwrap_or(current.due_date);
        let notes = patch.notes.unwrap_or(current.notes);
        let order_index = patch.order_index.unwrap_or(current.order_index);
        let risk_score = patch.risk_score.unwrap_or(current.risk_score);
        let stage = patch.stage.unwrap_or(current.stage);

        let status_changed = status != current.status;
        let completed = RequestStatus::Completed.as_str();
        // Entering completed stamps the completion date; leaving clears it.
        let completion_date_ms = if status == completed {
            if current.status == completed {
                current.completion_date_ms
            } else {
                Some(now)
            }
        } else {
            None
        };
        let last_activity_at_ms = if status_changed {
            Some(now)
        } else {
            current.last_activity_at_ms
        };

        let assignee_ids_json = encode_id_set(&assignee_ids)?;
        let reviewer_ids_json = encode_id_set(&reviewer_ids)?;
        let document_ids_json = encode_id_set(&document_ids)?;

        tx.execute(
            r#"
            UPDATE requests
            SET revision = ?2, subcategory_id = ?3, title = ?4, description = ?5,
                priority = ?6, status = ?7, assignee_ids_json = ?8, reviewer_ids_json = ?9,
                document_ids_json = ?10, due_date = ?11, completion_date_ms = ?12,
                notes = ?13, order_index = ?14, risk_score = ?15, stage = ?16,
                updated_at_ms = ?17, updated_by = ?18, last_activity_at_ms = ?19
            WHERE id = ?1
            "#,
            params![
                patch.id,
                new_revision,
                subcategory_id,
                title,
                description,
                priority,
                status,
                assignee_ids_json,
                reviewer_ids_json,
                document_ids_json,
                due_date,
                completion_date_ms,
                notes,
                order_index,
                risk_score,
                stage,
                now,
                patch.updated_by,
                last_activity_at_ms,
            ],
        )?;

        tx.commit()?;

        Ok(RequestRow {
            id: patch.id,
            revision: new_revision,
            deal_id: current.deal_id,
            category_id: current.category_id,
            subcategory_id,
            title,
            description,
            priority,
            status,
            assignee_ids,
            reviewer_ids,
            document_ids,
            due_date,
            completion_date_ms,
            notes,
            order_index,
            risk_score,
            stage,
            created_by: current.created_by,
            created_at_ms: current.created_at_ms,
            updated_at_ms: now,
            updated_by: Some(patch.updated_by),
            last_activity_at_ms,
        })
    }
}
