#![forbid(unsafe_code)]

use dd_core::ids::UserId;
use std::collections::BTreeMap;

/// External identity collaborator. A failed lookup is `None`; the engine
/// degrades to the raw user id as a label and never aborts an operation
/// over a missing profile.
pub trait IdentityResolver {
    fn display_name(&self, user: &UserId) -> Option<String>;
}

/// Map-backed resolver for callers that already hold their user directory,
/// and for tests.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentityResolver {
    names: BTreeMap<String, String>,
}

impl StaticIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, user: &UserId, name: impl Into<String>) -> Self {
        self.names.insert(user.as_str().to_string(), name.into());
        self
    }
}

impl IdentityResolver for StaticIdentityResolver {
    fn display_name(&self, user: &UserId) -> Option<String> {
        self.names.get(user.as_str()).cloned()
    }
}
