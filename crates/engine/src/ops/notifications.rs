#![forbid(unsafe_code)]

use super::Tracker;
use crate::error::EngineError;
use crate::support::ts_ms_to_rfc3339;
use crate::views::NotificationView;
use dd_core::ids::UserId;

impl Tracker {
    /// A user's in-app notifications, newest first.
    pub fn list_notifications(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<NotificationView>, EngineError> {
        Ok(self
            .store
            .list_notifications(user_id.as_str())?
            .into_iter()
            .map(|row| NotificationView {
                id: row.id,
                user_id: row.user_id,
                request_id: row.request_id,
                deal_id: row.deal_id,
                kind: row.kind,
                title: row.title,
                message: row.message,
                created_at: ts_ms_to_rfc3339(row.created_at_ms),
                read: row.read,
            })
            .collect())
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<(), EngineError> {
        if !self.store.mark_notification_read(id)? {
            return Err(EngineError::NotFound {
                kind: "notification",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
