#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError, encode_id_set, next_counter_tx, now_ms};
use super::types::{NewTemplate, TemplateItem, TemplateRow};
use dd_core::model::RequestStatus;
use rusqlite::{OptionalExtension, params};

const TEMPLATE_COLUMNS: &str =
    "id, name, description, industry, deal_type, template_data_json, is_default, created_by, created_at_ms";

fn map_template(row: &rusqlite::Row<'_>) -> rusqlite::Result<TemplateRow> {
    Ok(TemplateRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        industry: row.get(3)?,
        deal_type: row.get(4)?,
        template_data_json: row.get(5)?,
        is_default: row.get::<_, i64>(6)? != 0,
        created_by: row.get(7)?,
        created_at_ms: row.get(8)?,
    })
}

impl SqliteStore {
    pub fn insert_template(&mut self, new: NewTemplate) -> Result<TemplateRow, StoreError> {
        if new.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("template name is required"));
        }

        let now = now_ms();
        let tx = self.conn.transaction()?;

        let seq = next_counter_tx(&tx, "template_seq")?;
        let id = format!("TPL-{seq:03}");

        tx.execute(
            r#"
            INSERT INTO templates(
              id, name, description, industry, deal_type, template_data_json,
              is_default, created_by, created_at_ms
            )
            VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)
            "#,
            params![
                id,
                new.name,
                new.description,
                new.industry,
                new.deal_type,
                new.template_data_json,
                if new.is_default { 1i64 } else { 0i64 },
                new.created_by,
                now
            ],
        )?;

        tx.commit()?;

        Ok(TemplateRow {
            id,
            name: new.name,
            description: new.description,
            industry: new.industry,
            deal_type: new.deal_type,
            template_data_json: new.template_data_json,
            is_default: new.is_default,
            created_by: new.created_by,
            created_at_ms: now,
        })
    }

    pub fn get_template(&self, id: &str) -> Result<Option<TemplateRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?1"),
                params![id],
                map_template,
            )
            .optional()?)
    }

    pub fn list_templates(&self) -> Result<Vec<TemplateRow>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY id ASC"))?;
        let rows = stmt.query_map([], map_template)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert every expanded template request in one transaction. Either the
    /// whole batch lands under the deal or none of it does.
    pub fn insert_request_batch(
        &mut self,
        deal_id: &str,
        created_by: &str,
        items: &[TemplateItem],
    ) -> Result<usize, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }

        let now = now_ms();
        let empty_set = encode_id_set(&[])?;
        let tx = self.conn.transaction()?;

        for item in items {
            let category_exists = tx
                .query_row(
                    "SELECT 1 FROM categories WHERE id = ?1",
                    params![item.category_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !category_exists {
                return Err(StoreError::UnknownId);
            }

            let seq = next_counter_tx(&tx, "request_seq")?;
            let id = format!("REQ-{seq:04}");
            tx.execute(
                r#"
                INSERT INTO requests(
                  id, revision, deal_id, category_id, subcategory_id, title, description,
                  priority, status, assignee_ids_json, reviewer_ids_json, document_ids_json,
                  due_date, completion_date_ms, notes, order_index, risk_score, stage,
                  created_by, created_at_ms, updated_at_ms, updated_by, last_activity_at_ms
                )
                VALUES (?1,?2,?3,?4,NULL,?5,?6,?7,?8,?9,?9,?9,NULL,NULL,NULL,?10,NULL,NULL,?11,?12,?12,NULL,NULL)
                "#,
                params![
                    id,
                    0i64,
                    deal_id,
                    item.category_id,
                    item.title,
                    item.description,
                    item.priority,
                    RequestStatus::Open.as_str(),
                    empty_set,
                    item.order_index,
                    created_by,
                    now
                ],
            )?;
        }

        tx.commit()?;
        Ok(items.len())
    }
}
