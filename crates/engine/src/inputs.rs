#![forbid(unsafe_code)]

use dd_core::ids::{DealId, UserId};
use dd_core::model::{DealStage, Priority, RequestStatus};

/// Fields for a new due-diligence request. Unset options fall back to the
/// creation defaults: medium priority, open status, order index 0.
#[derive(Clone, Debug)]
pub struct RequestDraft {
    pub deal_id: DealId,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<RequestStatus>,
    pub assignee_ids: Vec<UserId>,
    pub reviewer_ids: Vec<UserId>,
    pub document_ids: Vec<String>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub order_index: Option<i64>,
    pub risk_score: Option<f64>,
    pub stage: Option<DealStage>,
}

impl RequestDraft {
    pub fn new(
        deal_id: DealId,
        category_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            deal_id,
            category_id: category_id.into(),
            subcategory_id: None,
            title: title.into(),
            description: None,
            priority: None,
            status: None,
            assignee_ids: Vec::new(),
            reviewer_ids: Vec::new(),
            document_ids: Vec::new(),
            due_date: None,
            notes: None,
            order_index: None,
            risk_score: None,
            stage: None,
        }
    }
}

/// Partial request update. `None` leaves a field alone; clearable fields
/// take `Some(None)` to reset. `expected_revision` opts in to the
/// concurrency check — without it the update is last-writer-wins.
#[derive(Clone, Debug, Default)]
pub struct RequestUpdate {
    pub expected_revision: Option<i64>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub subcategory_id: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<RequestStatus>,
    pub assignee_ids: Option<Vec<UserId>>,
    pub reviewer_ids: Option<Vec<UserId>>,
    pub document_ids: Option<Vec<String>>,
    pub due_date: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub order_index: Option<i64>,
    pub risk_score: Option<Option<f64>>,
    pub stage: Option<Option<DealStage>>,
}

#[derive(Clone, Debug, Default)]
pub struct CommentOptions {
    /// Reply target; must name a top-level comment on the same request.
    pub parent_id: Option<String>,
    /// Create the comment already approved, with the author as approver.
    pub approve_immediately: bool,
}
