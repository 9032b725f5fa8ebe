#![forbid(unsafe_code)]

mod error;
mod identity;
mod inputs;
mod notify;
mod ops;
mod outcome;
mod support;
mod template_file;
mod views;

pub use error::EngineError;
pub use identity::{IdentityResolver, StaticIdentityResolver};
pub use inputs::{CommentOptions, RequestDraft, RequestUpdate};
pub use ops::Tracker;
pub use outcome::{CommentMutation, RequestMutation, TemplateApplied};
pub use template_file::{TemplateCategory, TemplateData, TemplateDocument, TemplateRequestSpec};
pub use views::{
    CategoryView, CommentView, DealProgress, NotificationView, RequestView, SubcategoryView,
    TemplateView, ThreadedComment,
};
