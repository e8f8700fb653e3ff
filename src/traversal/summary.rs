use std::fmt;

use super::error::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Completed,
    Aborted(ErrorCode),
}

impl Status {
    pub fn is_completed(&self) -> bool {
        matches!(self, Status::Completed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Completed => f.write_str("completed"),
            Status::Aborted(reason) => write!(f, "aborted:{reason}"),
        }
    }
}

/// Outcome of one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub target_id: u64,
    /// Items pulled from the sequence, gaps excluded.
    pub scanned: u64,
    pub matched: u64,
    pub deleted: u64,
    pub failed: u64,
    pub status: Status,
    /// Set when the toggle state could not be put back.
    pub restore_error: Option<String>,
}

impl Summary {
    pub fn new(target_id: u64) -> Self {
        Self {
            target_id,
            scanned: 0,
            matched: 0,
            deleted: 0,
            failed: 0,
            status: Status::Completed,
            restore_error: None,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} deleted, {} failed ({} scanned): {}",
            self.matched, self.deleted, self.failed, self.scanned, self.status
        )?;
        if let Some(error) = &self.restore_error {
            write!(f, " (could not restore state: {error})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counts_and_outcome() {
        let mut summary = Summary::new(7);
        summary.scanned = 3;
        summary.matched = 1;
        summary.failed = 1;
        summary.status = Status::Aborted(ErrorCode::ResourceGone);
        assert_eq!(
            summary.to_string(),
            "1 matched, 0 deleted, 1 failed (3 scanned): aborted:resource-gone"
        );

        summary.restore_error = Some("Missing Permissions".into());
        assert!(summary.to_string().ends_with("(could not restore state: Missing Permissions)"));
    }
}
