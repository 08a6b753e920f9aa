//! Database client port
//!
//! The database engine is an external collaborator; the plugin only needs to
//! create a client for the local store and ask it to recreate its schema.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::core::models::TableBindings;

/// Where a local store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocator {
    /// Path of the store file
    pub path: PathBuf,
}

impl StoreLocator {
    /// Locator for a store file
    #[must_use]
    pub fn local(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

/// A connected database client
pub trait DatabaseClient {
    /// Drop and recreate every table from the given bindings
    ///
    /// This is destructive: existing rows are lost.
    fn recreate_schema(&self, tables: &TableBindings) -> impl Future<Output = anyhow::Result<()>>;
}

/// Creates database clients
pub trait DatabaseClientFactory {
    /// Client type produced by this factory
    type Client: DatabaseClient;

    /// Create a client bound to a local store
    fn create_client(&self, locator: &StoreLocator) -> anyhow::Result<Self::Client>;
}
