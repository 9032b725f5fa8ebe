#![forbid(unsafe_code)]

use super::super::{SqliteStore, StoreError, encode_id_set, next_counter_tx, now_ms};
use super::super::types::{NewRequest, RequestRow};
use super::{category_exists, subcategory_exists};
use rusqlite::params;

impl SqliteStore {
    pub fn create_request(&mut self, new: NewRequest) -> Result<RequestRow, StoreError> {
        if new.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("title is required"));
        }
        if new.deal_id.is_empty() {
            return Err(StoreError::InvalidInput("deal_id is required"));
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        if !category_exists(&tx, &new.category_id)? {
            return Err(StoreError::UnknownId);
        }
        if let Some(subcategory_id) = &new.subcategory_id
            && !subcategory_exists(&tx, subcategory_id)?
        {
            return Err(StoreError::UnknownId);
        }

        let seq = next_counter_tx(&tx, "request_seq")?;
        let id = format!("REQ-{seq:04}");

        let assignee_ids_json = encode_id_set(&new.assignee_ids)?;
        let reviewer_ids_json = encode_id_set(&new.reviewer_ids)?;
        let document_ids_json = encode_id_set(&new.document_ids)?;

        tx.execute(
            r#"
            INSERT INTO requests(
              id, revision, deal_id, category_id, subcategory_id, title, description,
              priority, status, assignee_ids_json, reviewer_ids_json, document_ids_json,
              due_date, completion_date_ms, notes, order_index, risk_score, stage,
              created_by, created_at_ms, updated_at_ms, updated_by, last_activity_at_ms
            )
            VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,?22,?23)
            "#,
            params![
                id,
                0i64,
                new.deal_id,
                new.category_id,
                new.subcategory_id,
                new.title,
                new.description,
                new.priority,
                new.status,
                assignee_ids_json,
                reviewer_ids_json,
                document_ids_json,
                new.due_date,
                Option::<i64>::None,
                new.notes,
                new.order_index,
                new.risk_score,
                new.stage,
                new.created_by,
                now,
                now,
                Option::<String>::None,
                Option::<i64>::None,
            ],
        )?;

        tx.commit()?;

        Ok(RequestRow {
            id,
            revision: 0,
            deal_id: new.deal_id,
            category_id: new.category_id,
            subcategory_id: new.subcategory_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: new.status,
            assignee_ids: new.assignee_ids,
            reviewer_ids: new.reviewer_ids,
            document_ids: new.document_ids,
            due_date: new.due_date,
            completion_date_ms: None,
            notes: new.notes,
            order_index: new.order_index,
            risk_score: new.risk_score,
            stage: new.stage,
            created_by: new.created_by,
            created_at_ms: now,
            updated_at_ms: now,
            updated_by: None,
            last_activity_at_ms: None,
        })
    }
}
