#![forbid(unsafe_code)]

/// A due-diligence request row. Status, priority, and stage are kept as
/// their stored text values; the engine validates them against the model
/// enums before they reach this layer.
#[derive(Clone, Debug)]
pub struct RequestRow {
    pub id: String,
    pub revision: i64,
    pub deal_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assignee_ids: Vec<String>,
    pub reviewer_ids: Vec<String>,
    pub document_ids: Vec<String>,
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

impl RequestRow {
    /// Single-assignee projection for callers that still expect one
    /// assignee: the first member of the authoritative set.
    pub fn legacy_assignee(&self) -> Option<&str> {
        self.assignee_ids.first().map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct NewRequest {
    pub deal_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub assignee_ids: Vec<String>,
    pub reviewer_ids: Vec<String>,
    pub document_ids: Vec<String>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub order_index: i64,
    pub risk_score: Option<f64>,
    pub stage: Option<String>,
    pub created_by: String,
}

/// Partial update. `None` leaves a field untouched; the inner option on
/// clearable fields distinguishes "set to NULL" from "leave as is".
#[derive(Clone, Debug, Default)]
pub struct RequestPatch {
    pub id: String,
    pub expected_revision: Option<i64>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub subcategory_id: Option<Option<String>>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub assignee_ids: Option<Vec<String>>,
    pub reviewer_ids: Option<Vec<String>>,
    pub document_ids: Option<Vec<String>>,
    pub due_date: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub order_index: Option<i64>,
    pub risk_score: Option<Option<f64>>,
    pub stage: Option<Option<String>>,
    pub updated_by: String,
}

impl RequestPatch {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.subcategory_id.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.assignee_ids.is_some()
            || self.reviewer_ids.is_some()
            || self.document_ids.is_some()
            || self.due_date.is_some()
            || self.notes.is_some()
            || self.order_index.is_some()
            || self.risk_score.is_some()
            || self.stage.is_some()
    }
}
