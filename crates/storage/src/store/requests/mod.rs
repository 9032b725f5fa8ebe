#![forbid(unsafe_code)]

mod create;
mod delete;
mod edit;
mod get;

use super::{StoreError, decode_id_set};
use super::types::RequestRow;
use rusqlite::{Connection, OptionalExtension, params};

pub(super) const REQUEST_COLUMNS: &str = "id, revision, deal_id, category_id, subcategory_id, \
     title, description, priority, status, assignee_ids_json, reviewer_ids_json, \
     document_ids_json, due_date, completion_date_ms, notes, order_index, risk_score, stage, \
     created_by, created_at_ms, updated_at_ms, updated_by, last_activity_at_ms";

/// Row with the id-set columns still in their serialized form; decoding can
/// fail and so happens outside the rusqlite mapping closure.
pub(super) struct RawRequest {
    pub id: String,
    pub revision: i64,
    pub deal_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assignee_ids_json: String,
    pub reviewer_ids_json: String,
    pub document_ids_json: String,
    pub due_date: Option<String>,
    pub completion_date_ms: Option<i64>,
    pub notes: Option<String>,
    pub order_index: i64,
    pub risk_score: Option<f64>,
    pub stage: Option<String>,
    pub created_by: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub updated_by: Option<String>,
    pub last_activity_at_ms: Option<i64>,
}

pub(super) fn map_raw_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRequest> {
    Ok(RawRequest {
        id: row.get(0)?,
        revision: row.get(1)?,
        deal_id: row.get(2)?,
        category_id: row.get(3)?,
        subcategory_id: row.get(4)?,
        title: row.get(5)?,
        description: row.get(6)?,
        priority: row.get(7)?,
        status: row.get(8)?,
        assignee_ids_json: row.get(9)?,
        reviewer_ids_json: row.get(10)?,
        document_ids_json: row.get(11)?,
        due_date: row.get(12)?,
        completion_date_ms: row.get(13)?,
        notes: row.get(14)?,
        order_index: row.get(15)?,
        risk_score: row.get(16)?,
        stage: row.get(17)?,
        created_by: row.get(18)?,
        created_at_ms: row.get(19)?,
        updated_at_ms: row.get(20)?,
        updated_by: row.get(21)?,
        last_activity_at_ms: row.get(22)?,
    })
}

pub(super) fn into_request_row(raw: RawRequest) -> Result<RequestRow, StoreError> {
    Ok(RequestRow {
        id: raw.id,
        revision: raw.revision,
        deal_id: raw.deal_id,
        category_id: raw.category_id,
        subcategory_id: raw.subcategory_id,
        title: raw.title,
        description: raw.description,
        priority: raw.priority,
        status: raw.status,
        assignee_ids: decode_id_set(&raw.assignee_ids_json)?,
        reviewer_ids: decode_id_set(&raw.reviewer_ids_json)?,
        document_ids: decode_id_set(&raw.document_ids_json)?,
        due_date: raw.due_date,
        completion_date_ms: raw.completion_date_ms,
        notes: raw.notes,
        order_index: raw.order_index,
        risk_score: raw.risk_score,
        stage: raw.stage,
        created_by: raw.created_by,
        created_at_ms: raw.created_at_ms,
        updated_at_ms: raw.updated_at_ms,
        updated_by: raw.updated_by,
        last_activity_at_ms: raw.last_activity_at_ms,
    })
}

pub(super) fn fetch_request(
    conn: &Connection,
    id: &str,
) -> Result<Option<RequestRow>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {REQUEST_COLUMNS} FROM requests WHERE id = ?1"),
            params![id],
            map_raw_request,
        )
        .optional()?;
    raw.map(into_request_row).transpose()
}

pub(super) fn category_exists(conn: &Connection, category_id: &str) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM categories WHERE id = ?1",
            params![category_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

pub(super) fn subcategory_exists(
    conn: &Connection,
    subcategory_id: &str,
) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM subcategories WHERE id = ?1",
            params![subcategory_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}
