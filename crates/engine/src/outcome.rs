#![forbid(unsafe_code)]

use crate::views::{CommentView, RequestView};

/// Result of a request mutation. The primary change always succeeded when
/// this is returned; `warnings` carries anything that degraded afterwards,
/// such as an undelivered notification batch.
#[derive(Clone, Debug)]
pub struct RequestMutation {
    pub request: RequestView,
    pub notifications_emitted: usize,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct CommentMutation {
    pub comment: CommentView,
    pub notifications_emitted: usize,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateApplied {
    pub requests_created: usize,
}
