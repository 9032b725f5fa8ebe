#![forbid(unsafe_code)]

use dd_storage::StoreError;

#[derive(Debug)]
pub enum EngineError {
    Validation(&'static str),
    NotFound { kind: &'static str, id: String },
    RevisionMismatch { expected: i64, actual: i64 },
    InvalidTemplate(serde_yaml::Error),
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation: {message}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::RevisionMismatch { expected, actual } => {
                write!(f, "revision mismatch (expected={expected}, actual={actual})")
            }
            Self::InvalidTemplate(err) => write!(f, "invalid template document: {err}"),
            Self::Store(err) => write!(f, "store: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::RevisionMismatch { expected, actual } => {
                Self::RevisionMismatch { expected, actual }
            }
            StoreError::InvalidInput(message) => Self::Validation(message),
            other => Self::Store(other),
        }
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::InvalidTemplate(value)
    }
}
