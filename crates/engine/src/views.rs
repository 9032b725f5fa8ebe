#![forbid(unsafe_code)]

use crate::template_file::TemplateData;
use dd_core::progress::percentage;
use dd_storage::DealCounts;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub order_index: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubcategoryView {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub order_index: i64,
}

/// Request enriched with taxonomy names and formatted timestamps.
/// `legacy_assignee_id` is the single-assignee projection: the first member
/// of the authoritative assignee set, kept for callers that still read one
/// assignee.
#[derive(Clone, Debug, Serialize)]
pub struct RequestView {
    pub id: String,
    pub revision: i64,
    pub deal_id: String,
    pub category_id: String,
    pub category_name: Option<String>,
    pub subcategory_id: Option<String>,
    pub subcategory_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub stage: Option<String>,
    pub assignee_ids: Vec<String>,
    pub legacy_assignee_id: Option<String>,
    pub reviewer_ids: Vec<String>,
    pub document_ids: Vec<String>,
    pub due_date: Option<String>,
    pub completion_date: Option<String>,
    pub notes: Option<String>,
    pub order_index: i64,
    pub risk_score: Option<f64>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
    pub updated_by: Option<String>,
    pub last_activity_at: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CommentView {
    pub id: String,
    pub request_id: String,
    pub user_id: String,
    pub author_name: String,
    pub content: String,
    pub comment_type: String,
    pub parent_comment_id: Option<String>,
    pub approved_by: Option<String>,
    pub approver_name: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A top-level comment with its direct replies in creation order.
#[derive(Clone, Debug, Serialize)]
pub struct ThreadedComment {
    pub comment: CommentView,
    pub replies: Vec<CommentView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NotificationView {
    pub id: String,
    pub user_id: String,
    pub request_id: String,
    pub deal_id: Option<String>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub created_at: String,
    pub read: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub deal_type: Option<String>,
    pub is_default: bool,
    pub created_by: Option<String>,
    pub created_at: String,
    pub data: TemplateData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DealProgress {
    pub deal_id: String,
    pub total_requests: u64,
    pub completed_requests: u64,
    pub progress_percentage: u8,
}

impl DealProgress {
    pub(crate) fn from_counts(counts: DealCounts) -> Self {
        Self {
            deal_id: counts.deal_id,
            total_requests: counts.total,
            completed_requests: counts.completed,
            progress_percentage: percentage(counts.completed, counts.total),
        }
    }
}
