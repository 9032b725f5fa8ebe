#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct CommentRow {
    pub id: String,
    pub request_id: String,
    pub user_id: String,
    pub content: String,
    pub comment_type: String,
    pub parent_comment_id: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl CommentRow {
    pub fn is_top_level(&self) -> bool {
        self.parent_comment_id.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct NewComment {
    pub request_id: String,
    pub user_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    /// Create the comment already approved, with the author as approver.
    pub approve: bool,
}
