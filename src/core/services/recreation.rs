//! Serialization of schema recreation per store

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

static GLOBAL: LazyLock<RecreationLocks> = LazyLock::new(RecreationLocks::default);

/// One async lock per store path
///
/// Recreation drops and recreates every table, so two recreations of the same
/// store must never interleave. Cloning shares the underlying lock table.
#[derive(Debug, Clone, Default)]
pub struct RecreationLocks {
    locks: Arc<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl RecreationLocks {
    /// Lock table shared by every loader in the process
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// The lock guarding `store`
    #[must_use]
    pub fn lock_for(&self, store: &Path) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(store.to_path_buf()).or_default())
    }
}
