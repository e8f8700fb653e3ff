use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::policy::Policy;

/// The policy file and its in-memory copy.
///
/// Every mutation goes through [`PolicyStore::update`], which writes the file
/// before releasing the lock so the two never drift apart.
#[derive(Debug)]
pub struct PolicyStore {
    path: PathBuf,
    policy: RwLock<Policy>,
}

impl PolicyStore {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let policy: Policy = match tokio::fs::read_to_string(&path).await {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("{} is not a valid policy file", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "policy file not found, starting empty");
                Policy::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        Ok(Self {
            path,
            policy: RwLock::new(policy),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Policy {
        self.policy.read().await.clone()
    }

    pub async fn read<T>(&self, f: impl FnOnce(&Policy) -> T) -> T {
        f(&*self.policy.read().await)
    }

    /// Applies `f` and persists the result. On a write failure the in-memory
    /// change is kept and the error is returned.
    pub async fn update<T>(&self, f: impl FnOnce(&mut Policy) -> T) -> Result<T> {
        let mut policy = self.policy.write().await;
        let result = f(&mut *policy);
        if let Err(e) = save(&self.path, &policy).await {
            warn!(path = %self.path.display(), error = %e, "failed to persist policy");
            return Err(e);
        }
        Ok(result)
    }
}

async fn save(path: &Path, policy: &Policy) -> Result<()> {
    let content = toml::to_string_pretty(policy).context("failed to serialize policy")?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PolicyStore::load(dir.path().join("policy.toml")).await.unwrap();
        assert_eq!(store.snapshot().await, Policy::default());
    }

    #[tokio::test]
    async fn updates_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");

        let store = PolicyStore::load(&path).await.unwrap();
        assert!(store.update(|policy| policy.elevate_role(11)).await.unwrap());
        assert!(store.update(|policy| policy.elevate_member(22)).await.unwrap());
        assert!(store.update(|policy| policy.add_operator(33)).await.unwrap());

        let reloaded = PolicyStore::load(&path).await.unwrap();
        let policy = reloaded.snapshot().await;
        assert!(policy.elevated_roles.contains(&11));
        assert!(policy.elevated_members.contains(&22));
        assert!(policy.operators.contains(&33));
    }

    #[tokio::test]
    async fn reads_hand_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        tokio::fs::write(&path, "operators = [1, 2]\n").await.unwrap();

        let store = PolicyStore::load(&path).await.unwrap();
        let operators = store.read(|policy| policy.operators.len()).await;
        assert_eq!(operators, 2);
        assert!(store.read(|policy| policy.elevated_roles.is_empty()).await);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("policy.toml");
        let store = PolicyStore::load(&path).await.unwrap();

        assert!(store.update(|policy| policy.elevate_role(1)).await.is_err());
        assert!(store.read(|policy| policy.elevated_roles.contains(&1)).await);
    }
}
