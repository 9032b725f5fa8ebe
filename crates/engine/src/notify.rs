#![forbid(unsafe_code)]

use dd_core::ids::UserId;
use dd_core::model::NotificationKind;
use dd_storage::{NewNotification, RequestRow, SqliteStore};
use std::collections::BTreeSet;

/// Notifications accumulated for one trigger. A recipient is admitted at
/// most once per trigger, whichever rule reaches them first.
pub(crate) struct NotificationPlan {
    request_id: String,
    deal_id: Option<String>,
    batch: Vec<NewNotification>,
    seen: BTreeSet<String>,
}

impl NotificationPlan {
    pub(crate) fn for_request(request: &RequestRow) -> Self {
        Self {
            request_id: request.id.clone(),
            deal_id: Some(request.deal_id.clone()),
            batch: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        user: &UserId,
        kind: NotificationKind,
        title: &str,
        message: String,
    ) {
        if !self.seen.insert(user.as_str().to_string()) {
            return;
        }
        self.batch.push(NewNotification {
            user_id: user.as_str().to_string(),
            request_id: self.request_id.clone(),
            deal_id: self.deal_id.clone(),
            kind: kind.as_str().to_string(),
            title: title.to_string(),
            message,
        });
    }

    /// Single batch write, after the primary mutation committed. A failed
    /// batch is not the operation's failure: the state change stands, the
    /// loss is surfaced as a warning, and nothing is retried.
    pub(crate) fn deliver(self, store: &mut SqliteStore, warnings: &mut Vec<String>) -> usize {
        if self.batch.is_empty() {
            return 0;
        }
        match store.insert_notifications(&self.batch) {
            Ok(count) => count,
            Err(err) => {
                warnings.push(format!("notification batch not delivered: {err}"));
                0
            }
        }
    }
}
