#![forbid(unsafe_code)]

use super::{Tracker, dedup_user_ids, stored_user_ids, user_id_strings};
use crate::error::EngineError;
use crate::inputs::{RequestDraft, RequestUpdate};
use crate::notify::NotificationPlan;
use crate::outcome::RequestMutation;
use crate::views::RequestView;
use dd_core::fanout;
use dd_core::ids::{DealId, UserId};
use dd_core::model::{NotificationKind, Priority, RequestStatus};
use dd_storage::{NewRequest, RequestPatch};

impl Tracker {
    pub fn create_request(
        &mut self,
        actor: &UserId,
        draft: RequestDraft,
    ) -> Result<RequestMutation, EngineError> {
        if draft.title.trim().is_empty() {
            return Err(EngineError::Validation("title is required"));
        }
        if draft.category_id.is_empty() {
            return Err(EngineError::Validation("category_id is required"));
        }
        let category_known = self
            .store
            .list_categories()?
            .iter()
            .any(|category| category.id == draft.category_id);
        if !category_known {
            return Err(EngineError::NotFound {
                kind: "category",
                id: draft.category_id,
            });
        }

        let assignees = dedup_user_ids(&draft.assignee_ids);
        let reviewers = dedup_user_ids(&draft.reviewer_ids);

        let row = self.store.create_request(NewRequest {
            deal_id: draft.deal_id.as_str().to_string(),
            category_id: draft.category_id,
            subcategory_id: draft.subcategory_id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority.unwrap_or(Priority::Medium).as_str().to_string(),
            status: draft.status.unwrap_or(RequestStatus::Open).as_str().to_string(),
            assignee_ids: user_id_strings(&assignees),
            reviewer_ids: user_id_strings(&reviewers),
            document_ids: draft.document_ids,
            due_date: draft.due_date,
            notes: draft.notes,
            order_index: draft.order_index.unwrap_or(0),
            risk_score: draft.risk_score,
            stage: draft.stage.map(|stage| stage.as_str().to_string()),
            created_by: actor.as_str().to_string(),
        })?;

        let mut warnings = Vec::new();
        let mut plan = NotificationPlan::for_request(&row);
        let actor_label = self.display_label(actor);
        for user in fanout::members_except(&assignees, actor) {
            plan.push(
                &user,
                NotificationKind::Assignment,
                "New assignment",
                format!("{actor_label} assigned you to \"{}\"", row.title),
            );
        }
        let notifications_emitted = plan.deliver(&mut self.store, &mut warnings);

        Ok(RequestMutation {
            request: self.request_view(row)?,
            notifications_emitted,
            warnings,
        })
    }

    /// Read the pre-update row, apply the patch, then fan out based on what
    /// actually changed. The pre-read can be stale under concurrent writers;
    /// that is accepted at this write rate.
    pub fn update_request(
        &mut self,
        actor: &UserId,
        id: &str,
        update: RequestUpdate,
    ) -> Result<RequestMutation, EngineError> {
        let Some(before) = self.store.get_request(id)? else {
            return Err(EngineError::NotFound {
                kind: "request",
                id: id.to_string(),
            });
        };

        if let Some(title) = &update.title
            && title.trim().is_empty()
        {
            return Err(EngineError::Validation("title must not be empty"));
        }

        let assignees = update
            .assignee_ids
            .as_deref()
            .map(dedup_user_ids);
        let reviewers = update
            .reviewer_ids
            .as_deref()
            .map(dedup_user_ids);

        let after = self.store.edit_request(RequestPatch {
            id: id.to_string(),
            expected_revision: update.expected_revision,
            title: update.title,
            description: update.description,
            subcategory_id: update.subcategory_id,
            priority: update.priority.map(|priority| priority.as_str().to_string()),
            status: update.status.map(|status| status.as_str().to_string()),
            assignee_ids: assignees.as_deref().map(user_id_strings),
            reviewer_ids: reviewers.as_deref().map(user_id_strings),
            document_ids: update.document_ids,
            due_date: update.due_date,
            notes: update.notes,
            order_index: update.order_index,
            risk_score: update.risk_score,
            stage: update
                .stage
                .map(|stage| stage.map(|stage| stage.as_str().to_string())),
            updated_by: actor.as_str().to_string(),
        })?;

        let mut warnings = Vec::new();
        let mut plan = NotificationPlan::for_request(&after);
        let actor_label = self.display_label(actor);

        let old_assignees = stored_user_ids(&before.assignee_ids);
        let new_assignees = stored_user_ids(&after.assignee_ids);
        for user in fanout::assignment_added(&old_assignees, &new_assignees, actor) {
            plan.push(
                &user,
                NotificationKind::Assignment,
                "New assignment",
                format!("{actor_label} assigned you to \"{}\"", after.title),
            );
        }

        if after.status != before.status {
            for user in fanout::members_except(&new_assignees, actor) {
                plan.push(
                    &user,
                    NotificationKind::StatusChange,
                    "Request status updated",
                    format!(
                        "{actor_label} moved \"{}\" to {}",
                        after.title, after.status
                    ),
                );
            }
        }

        let notifications_emitted = plan.deliver(&mut self.store, &mut warnings);

        Ok(RequestMutation {
            request: self.request_view(after)?,
            notifications_emitted,
            warnings,
        })
    }

    /// Hard delete, permanent. Comments and notifications under the request
    /// are left behind.
    pub fn delete_request(&mut self, id: &str, deal_id: &DealId) -> Result<(), EngineError> {
        let Some(existing) = self.store.get_request(id)? else {
            return Err(EngineError::NotFound {
                kind: "request",
                id: id.to_string(),
            });
        };
        if existing.deal_id != deal_id.as_str() {
            return Err(EngineError::NotFound {
                kind: "request",
                id: id.to_string(),
            });
        }
        self.store.delete_request(id)?;
        Ok(())
    }

    pub fn get_request(&self, id: &str) -> Result<RequestView, EngineError> {
        let Some(row) = self.store.get_request(id)? else {
            return Err(EngineError::NotFound {
                kind: "request",
                id: id.to_string(),
            });
        };
        self.request_view(row)
    }

    pub fn list_requests(
        &self,
        deal_id: Option<&DealId>,
    ) -> Result<Vec<RequestView>, EngineError> {
        let rows = self
            .store
            .list_requests(deal_id.map(|deal| deal.as_str()))?;
        self.request_views(rows)
    }
}
