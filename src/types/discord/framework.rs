use crate::infrastructure::policy_store::PolicyStore;
use crate::infrastructure::settings::Settings;
use crate::traversal::ConcurrencyGuard;

pub struct Data {
    pub settings: Settings,
    pub policy: PolicyStore,
    /// Subjects whose messages are being deleted.
    pub sweeps: ConcurrencyGuard,
    /// Source channels being migrated.
    pub migrations: ConcurrencyGuard,
}

impl Data {
    pub fn new(settings: Settings, policy: PolicyStore) -> Self {
        Self {
            settings,
            policy,
            sweeps: ConcurrencyGuard::new(),
            migrations: ConcurrencyGuard::new(),
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
