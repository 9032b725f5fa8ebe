#![forbid(unsafe_code)]

mod comments;
mod lifecycle;
mod notifications;
mod progress;
mod taxonomy;
mod templates;

use crate::error::EngineError;
use crate::identity::IdentityResolver;
use crate::support::ts_ms_to_rfc3339;
use crate::views::{CommentView, RequestView};
use dd_core::ids::UserId;
use dd_storage::{CommentRow, RequestRow, SqliteStore};
use std::collections::BTreeMap;
use std::path::Path;

/// The tracking engine. Request/response only: every operation validates,
/// mutates, fans out its notifications, and returns within the call. The
/// acting user is always an explicit parameter, never ambient state.
pub struct Tracker {
    pub(crate) store: SqliteStore,
    identity: Box<dyn IdentityResolver>,
}

impl Tracker {
    pub fn open(
        storage_dir: impl AsRef<Path>,
        identity: Box<dyn IdentityResolver>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            store: SqliteStore::open(storage_dir)?,
            identity,
        })
    }

    pub(crate) fn display_label(&self, user: &UserId) -> String {
        self.identity
            .display_name(user)
            .unwrap_or_else(|| user.as_str().to_string())
    }

    /// Label for a user id read back from a row. Ids that no longer parse
    /// or resolve degrade to the raw value.
    pub(crate) fn display_label_raw(&self, user_id: &str) -> String {
        UserId::try_new(user_id)
            .ok()
            .and_then(|user| self.identity.display_name(&user))
            .unwrap_or_else(|| user_id.to_string())
    }

    pub(crate) fn request_view(&self, row: RequestRow) -> Result<RequestView, EngineError> {
        let mut views = self.request_views(vec![row])?;
        Ok(views.remove(0))
    }

    pub(crate) fn request_views(
        &self,
        rows: Vec<RequestRow>,
    ) -> Result<Vec<RequestView>, EngineError> {
        let category_names: BTreeMap<String, String> = self
            .store
            .list_categories()?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();
        let subcategory_names: BTreeMap<String, String> = self
            .store
            .list_subcategories()?
            .into_iter()
            .map(|subcategory| (subcategory.id, subcategory.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let category_name = category_names.get(&row.category_id).cloned();
                let subcategory_name = row
                    .subcategory_id
                    .as_ref()
                    .and_then(|id| subcategory_names.get(id).cloned());
                let legacy_assignee_id = row.legacy_assignee().map(str::to_string);
                RequestView {
                    id: row.id,
                    revision: row.revision,
                    deal_id: row.deal_id,
                    category_id: row.category_id,
                    category_name,
                    subcategory_id: row.subcategory_id,
                    subcategory_name,
                    title: row.title,
                    description: row.description,
                    priority: row.priority,
                    status: row.status,
                    stage: row.stage,
                    assignee_ids: row.assignee_ids,
                    legacy_assignee_id,
                    reviewer_ids: row.reviewer_ids,
                    document_ids: row.document_ids,
                    due_date: row.due_date,
                    completion_date: row.completion_date_ms.map(ts_ms_to_rfc3339),
                    notes: row.notes,
                    order_index: row.order_index,
                    risk_score: row.risk_score,
                    created_by: row.created_by,
                    created_at: ts_ms_to_rfc3339(row.created_at_ms),
                    updated_at: ts_ms_to_rfc3339(row.updated_at_ms),
                    updated_by: row.updated_by,
                    last_activity_at: row.last_activity_at_ms.map(ts_ms_to_rfc3339),
                }
            })
            .collect())
    }

    pub(crate) fn comment_view(&self, row: CommentRow) -> CommentView {
        let author_name = self.display_label_raw(&row.user_id);
        let approver_name = row
            .approved_by
            .as_deref()
            .map(|approver| self.display_label_raw(approver));
        CommentView {
            id: row.id,
            request_id: row.request_id,
            user_id: row.user_id,
            author_name,
            content: row.content,
            comment_type: row.comment_type,
            parent_comment_id: row.parent_comment_id,
            approved_by: row.approved_by,
            approver_name,
            approved_at: row.approved_at_ms.map(ts_ms_to_rfc3339),
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
            updated_at: ts_ms_to_rfc3339(row.updated_at_ms),
        }
    }
}

/// Parse stored user ids back into the typed form, dropping any that no
/// longer validate. Recipients must be addressable or they cannot be
/// notified at all.
pub(crate) fn stored_user_ids(raw: &[String]) -> Vec<UserId> {
    raw.iter()
        .filter_map(|value| UserId::try_new(value.as_str()).ok())
        .collect()
}

/// Duplicate-free copy of a caller-supplied user id list, preserving first
/// occurrence order. The set is ordered: the first member doubles as the
/// single-assignee projection.
pub(crate) fn dedup_user_ids(ids: &[UserId]) -> Vec<UserId> {
    let mut deduped: Vec<UserId> = Vec::new();
    for id in ids {
        if !deduped.contains(id) {
            deduped.push(id.clone());
        }
    }
    deduped
}

pub(crate) fn user_id_strings(ids: &[UserId]) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_string()).collect()
}
