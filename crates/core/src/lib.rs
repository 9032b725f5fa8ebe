#![forbid(unsafe_code)]

pub mod fanout;
pub mod progress;

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct UserId(String);

    impl UserId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, IdError> {
            let value = value.into();
            validate_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct DealId(String);

    impl DealId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, IdError> {
            let value = value.into();
            validate_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum IdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    impl std::fmt::Display for IdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Empty => write!(f, "id is empty"),
                Self::TooLong => write!(f, "id is longer than 128 chars"),
                Self::InvalidFirstChar => write!(f, "id must start with an ascii alphanumeric"),
                Self::InvalidChar { ch, index } => {
                    write!(f, "invalid char {ch:?} at index {index}")
                }
            }
        }
    }

    impl std::error::Error for IdError {}

    fn validate_id(value: &str) -> Result<(), IdError> {
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.len() > 128 {
            return Err(IdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(IdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(IdError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '@' | '-') {
                continue;
            }
            return Err(IdError::InvalidChar { ch, index });
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn accepts_typical_ids() {
            assert!(UserId::try_new("u_1").is_ok());
            assert!(UserId::try_new("anna.kovacs@example.com").is_ok());
            assert!(DealId::try_new("deal-2026-helios").is_ok());
        }

        #[test]
        fn rejects_malformed_ids() {
            assert_eq!(UserId::try_new(""), Err(IdError::Empty));
            assert_eq!(UserId::try_new("-lead"), Err(IdError::InvalidFirstChar));
            assert_eq!(
                DealId::try_new("deal 7"),
                Err(IdError::InvalidChar { ch: ' ', index: 4 })
            );
            assert_eq!(UserId::try_new("x".repeat(129)), Err(IdError::TooLong));
        }
    }
}

pub mod model {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Priority {
        High,
        Medium,
        Low,
    }

    impl Priority {
        pub fn as_str(self) -> &'static str {
            match self {
                Priority::High => "high",
                Priority::Medium => "medium",
                Priority::Low => "low",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "high" => Some(Priority::High),
                "medium" => Some(Priority::Medium),
                "low" => Some(Priority::Low),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum RequestStatus {
        Open,
        InProgress,
        Completed,
        Blocked,
    }

    impl RequestStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                RequestStatus::Open => "open",
                RequestStatus::InProgress => "in_progress",
                RequestStatus::Completed => "completed",
                RequestStatus::Blocked => "blocked",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "open" => Some(RequestStatus::Open),
                "in_progress" => Some(RequestStatus::InProgress),
                "completed" => Some(RequestStatus::Completed),
                "blocked" => Some(RequestStatus::Blocked),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum DealStage {
        Early,
        DueDiligence,
        FinalReview,
        Closed,
    }

    impl DealStage {
        pub fn as_str(self) -> &'static str {
            match self {
                DealStage::Early => "early",
                DealStage::DueDiligence => "due_diligence",
                DealStage::FinalReview => "final_review",
                DealStage::Closed => "closed",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "early" => Some(DealStage::Early),
                "due_diligence" => Some(DealStage::DueDiligence),
                "final_review" => Some(DealStage::FinalReview),
                "closed" => Some(DealStage::Closed),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CommentKind {
        Internal,
        Approved,
    }

    impl CommentKind {
        pub fn as_str(self) -> &'static str {
            match self {
                CommentKind::Internal => "internal",
                CommentKind::Approved => "approved",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "internal" => Some(CommentKind::Internal),
                "approved" => Some(CommentKind::Approved),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum NotificationKind {
        Assignment,
        StatusChange,
        Comment,
        ApprovedAnswer,
    }

    impl NotificationKind {
        pub fn as_str(self) -> &'static str {
            match self {
                NotificationKind::Assignment => "assignment",
                NotificationKind::StatusChange => "status_change",
                NotificationKind::Comment => "comment",
                NotificationKind::ApprovedAnswer => "approved_answer",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "assignment" => Some(NotificationKind::Assignment),
                "status_change" => Some(NotificationKind::StatusChange),
                "comment" => Some(NotificationKind::Comment),
                "approved_answer" => Some(NotificationKind::ApprovedAnswer),
                _ => None,
            }
        }
    }
}
