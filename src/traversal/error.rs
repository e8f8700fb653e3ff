use std::fmt;

use thiserror::Error;

/// Closed set of failure codes an action (or a page fetch) can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The target must have its toggle state turned off first (an archived thread).
    DisabledState,
    ResourceNotFound,
    ResourceGone,
    NoAccess,
    InsufficientPermission,
    /// The item is a system item the action cannot touch.
    SystemItem,
    TargetLocked,
    /// Anything the table above does not know about, with the raw code if one was reported.
    Unclassified(Option<i64>),
}

/// What the engine does when an action fails with a given code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    RetryAfterStateFix,
    Abort,
    Skip,
}

impl ErrorCode {
    pub fn policy(self) -> ErrorPolicy {
        match self {
            ErrorCode::DisabledState => ErrorPolicy::RetryAfterStateFix,
            ErrorCode::ResourceNotFound
            | ErrorCode::ResourceGone
            | ErrorCode::NoAccess
            | ErrorCode::InsufficientPermission => ErrorPolicy::Abort,
            ErrorCode::SystemItem | ErrorCode::TargetLocked | ErrorCode::Unclassified(_) => {
                ErrorPolicy::Skip
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::DisabledState => f.write_str("operation-on-disabled-state"),
            ErrorCode::ResourceNotFound => f.write_str("resource-not-found"),
            ErrorCode::ResourceGone => f.write_str("resource-gone"),
            ErrorCode::NoAccess => f.write_str("no-access"),
            ErrorCode::InsufficientPermission => f.write_str("insufficient-permission"),
            ErrorCode::SystemItem => f.write_str("not-applicable-to-system-item"),
            ErrorCode::TargetLocked => f.write_str("target-locked"),
            ErrorCode::Unclassified(Some(code)) => write!(f, "unclassified-{code}"),
            ErrorCode::Unclassified(None) => f.write_str("unclassified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ActionError {
    pub code: ErrorCode,
    pub message: String,
}

impl ActionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.code.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(
            ErrorCode::DisabledState.policy(),
            ErrorPolicy::RetryAfterStateFix
        );
        for code in [
            ErrorCode::ResourceNotFound,
            ErrorCode::ResourceGone,
            ErrorCode::NoAccess,
            ErrorCode::InsufficientPermission,
        ] {
            assert_eq!(code.policy(), ErrorPolicy::Abort, "{code}");
        }
        for code in [
            ErrorCode::SystemItem,
            ErrorCode::TargetLocked,
            ErrorCode::Unclassified(Some(40001)),
            ErrorCode::Unclassified(None),
        ] {
            assert_eq!(code.policy(), ErrorPolicy::Skip, "{code}");
        }
    }

    #[test]
    fn renders_reason_names() {
        assert_eq!(ErrorCode::ResourceGone.to_string(), "resource-gone");
        assert_eq!(
            ErrorCode::Unclassified(Some(30001)).to_string(),
            "unclassified-30001"
        );
        let err = ActionError::new(ErrorCode::TargetLocked, "Thread is locked");
        assert_eq!(err.to_string(), "target-locked: Thread is locked");
    }
}
