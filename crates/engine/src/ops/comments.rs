#![forbid(unsafe_code)]

use super::{Tracker, stored_user_ids};
use crate::error::EngineError;
use crate::inputs::CommentOptions;
use crate::notify::NotificationPlan;
use crate::outcome::CommentMutation;
use crate::views::{CommentView, ThreadedComment};
use dd_core::fanout;
use dd_core::ids::UserId;
use dd_core::model::NotificationKind;
use dd_storage::{NewComment, RequestRow};

impl Tracker {
    pub fn add_comment(
        &mut self,
        actor: &UserId,
        request_id: &str,
        content: &str,
        opts: CommentOptions,
    ) -> Result<CommentMutation, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::Validation("content is required"));
        }
        let Some(request) = self.store.get_request(request_id)? else {
            return Err(EngineError::NotFound {
                kind: "request",
                id: request_id.to_string(),
            });
        };

        if let Some(parent_id) = &opts.parent_id {
            let Some(parent) = self.store.get_comment(parent_id)? else {
                return Err(EngineError::NotFound {
                    kind: "comment",
                    id: parent_id.clone(),
                });
            };
            if parent.request_id != request_id {
                return Err(EngineError::Validation(
                    "parent comment belongs to a different request",
                ));
            }
            if !parent.is_top_level() {
                return Err(EngineError::Validation(
                    "parent must be a top-level comment",
                ));
            }
        }

        // Prior commenters are captured before this comment lands.
        let prior_commenters = self.store.list_commenters(request_id)?;

        let comment = self.store.insert_comment(NewComment {
            request_id: request_id.to_string(),
            user_id: actor.as_str().to_string(),
            content: content.to_string(),
            parent_comment_id: opts.parent_id,
            approve: opts.approve_immediately,
        })?;

        let kind = if opts.approve_immediately {
            NotificationKind::ApprovedAnswer
        } else {
            NotificationKind::Comment
        };
        let (emitted, warnings) =
            self.fan_out_comment(actor, &request, &prior_commenters, kind);

        Ok(CommentMutation {
            comment: self.comment_view(comment),
            notifications_emitted: emitted,
            warnings,
        })
    }

    pub fn approve_comment(
        &mut self,
        actor: &UserId,
        id: &str,
    ) -> Result<CommentMutation, EngineError> {
        let Some(existing) = self.store.get_comment(id)? else {
            return Err(EngineError::NotFound {
                kind: "comment",
                id: id.to_string(),
            });
        };
        let Some(request) = self.store.get_request(&existing.request_id)? else {
            return Err(EngineError::NotFound {
                kind: "request",
                id: existing.request_id,
            });
        };

        let comment = self.store.approve_comment(id, actor.as_str())?;

        let commenters = self.store.list_commenters(&comment.request_id)?;
        let (emitted, warnings) = self.fan_out_comment(
            actor,
            &request,
            &commenters,
            NotificationKind::ApprovedAnswer,
        );

        Ok(CommentMutation {
            comment: self.comment_view(comment),
            notifications_emitted: emitted,
            warnings,
        })
    }

    pub fn unapprove_comment(&mut self, id: &str) -> Result<CommentView, EngineError> {
        if self.store.get_comment(id)?.is_none() {
            return Err(EngineError::NotFound {
                kind: "comment",
                id: id.to_string(),
            });
        }
        let comment = self.store.unapprove_comment(id)?;
        Ok(self.comment_view(comment))
    }

    pub fn update_comment(&mut self, id: &str, content: &str) -> Result<CommentView, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::Validation("content is required"));
        }
        if self.store.get_comment(id)?.is_none() {
            return Err(EngineError::NotFound {
                kind: "comment",
                id: id.to_string(),
            });
        }
        let comment = self.store.update_comment_content(id, content)?;
        Ok(self.comment_view(comment))
    }

    pub fn delete_comment(&mut self, id: &str) -> Result<(), EngineError> {
        if !self.store.delete_comment(id)? {
            return Err(EngineError::NotFound {
                kind: "comment",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Comments partitioned into top-level entries with their direct
    /// replies, both in creation order.
    pub fn list_comments(&self, request_id: &str) -> Result<Vec<ThreadedComment>, EngineError> {
        if self.store.get_request(request_id)?.is_none() {
            return Err(EngineError::NotFound {
                kind: "request",
                id: request_id.to_string(),
            });
        }

        let rows = self.store.list_comments(request_id)?;
        let mut threads: Vec<ThreadedComment> = Vec::new();
        let mut replies: Vec<dd_storage::CommentRow> = Vec::new();
        for row in rows {
            if row.is_top_level() {
                threads.push(ThreadedComment {
                    comment: self.comment_view(row),
                    replies: Vec::new(),
                });
            } else {
                replies.push(row);
            }
        }
        for reply in replies {
            let parent_id = reply.parent_comment_id.clone().unwrap_or_default();
            if let Some(thread) = threads
                .iter_mut()
                .find(|thread| thread.comment.id == parent_id)
            {
                thread.replies.push(self.comment_view(reply));
            }
        }
        Ok(threads)
    }

    fn fan_out_comment(
        &mut self,
        actor: &UserId,
        request: &RequestRow,
        commenters: &[String],
        kind: NotificationKind,
    ) -> (usize, Vec<String>) {
        let assignees = stored_user_ids(&request.assignee_ids);
        let prior_commenters = stored_user_ids(commenters);
        let creator = UserId::try_new(request.created_by.as_str()).ok();

        let mut warnings = Vec::new();
        let mut plan = NotificationPlan::for_request(request);
        let actor_label = self.display_label(actor);
        let (title, message) = match kind {
            NotificationKind::ApprovedAnswer => (
                "Answer approved",
                format!(
                    "{actor_label} posted an approved answer on \"{}\"",
                    request.title
                ),
            ),
            _ => (
                "New comment",
                format!("{actor_label} commented on \"{}\"", request.title),
            ),
        };

        let Some(creator) = creator else {
            return (plan.deliver(&mut self.store, &mut warnings), warnings);
        };
        for user in fanout::comment_recipients(
            assignees.first(),
            &creator,
            &prior_commenters,
            actor,
        ) {
            plan.push(&user, kind, title, message.clone());
        }

        let emitted = plan.deliver(&mut self.store, &mut warnings);
        (emitted, warnings)
    }
}
