use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Set of subjects that currently have a traversal running.
///
/// `try_acquire` checks and inserts under one lock, and the returned lease
/// removes the subject again when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct ConcurrencyGuard {
    active: Arc<Mutex<HashSet<u64>>>,
}

impl ConcurrencyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` if `subject` is already held.
    pub fn try_acquire(&self, subject: u64) -> Option<Lease> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(subject) {
            return None;
        }
        Some(Lease {
            active: Arc::clone(&self.active),
            subject,
        })
    }

    pub fn is_held(&self, subject: u64) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&subject)
    }
}

#[derive(Debug)]
pub struct Lease {
    active: Arc<Mutex<HashSet<u64>>>,
    subject: u64,
}

impl Lease {
    pub fn subject(&self) -> u64 {
        self.subject
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.subject);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_same_subject_is_rejected() {
        let guard = ConcurrencyGuard::new();
        let lease = guard.try_acquire(42).expect("first acquire");
        assert!(guard.try_acquire(42).is_none());
        assert!(guard.try_acquire(43).is_some());
        assert_eq!(lease.subject(), 42);
    }

    #[test]
    fn dropping_the_lease_releases_the_subject() {
        let guard = ConcurrencyGuard::new();
        {
            let _lease = guard.try_acquire(1).expect("acquire");
            assert!(guard.is_held(1));
        }
        assert!(!guard.is_held(1));
        assert!(guard.try_acquire(1).is_some());
    }

    #[tokio::test]
    async fn released_when_the_holding_task_is_cancelled() {
        let guard = ConcurrencyGuard::new();
        let task_guard = guard.clone();
        let handle = tokio::spawn(async move {
            let _lease = task_guard.try_acquire(9).expect("acquire");
            std::future::pending::<()>().await;
        });
        tokio::task::yield_now().await;
        while !guard.is_held(9) {
            tokio::task::yield_now().await;
        }
        handle.abort();
        let _ = handle.await;
        assert!(!guard.is_held(9));
    }
}
