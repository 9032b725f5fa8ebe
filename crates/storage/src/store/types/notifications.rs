#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub request_id: String,
    pub deal_id: Option<String>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub created_at_ms: i64,
    pub read: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: String,
    pub request_id: String,
    pub deal_id: Option<String>,
    pub kind: String,
    pub title: String,
    pub message: String,
}
