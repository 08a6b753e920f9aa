//! JSON schema store
//!
//! Implements `DatabaseClientFactory` for local development without a SQL
//! engine: recreating the schema rewrites the store file with the current
//! table bindings. The file is replaced atomically (temp file + rename), so a
//! reader never observes a half-written schema.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::models::TableBindings;
use crate::core::ports::{DatabaseClient, DatabaseClientFactory, StoreLocator};

/// Contents of a store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSchema {
    /// When the schema was last recreated (RFC 3339)
    pub recreated_at: String,
    /// Every table, by name
    pub tables: TableBindings,
}

impl StoredSchema {
    /// Read a store file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Creates [`JsonSchemaClient`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaStore;

impl DatabaseClientFactory for JsonSchemaStore {
    type Client = JsonSchemaClient;

    fn create_client(&self, locator: &StoreLocator) -> anyhow::Result<Self::Client> {
        if locator.path.as_os_str().is_empty() {
            anyhow::bail!("Store path is empty");
        }
        Ok(JsonSchemaClient {
            path: locator.path.clone(),
        })
    }
}

/// Client bound to one store file
#[derive(Debug, Clone)]
pub struct JsonSchemaClient {
    path: PathBuf,
}

impl JsonSchemaClient {
    /// Store file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatabaseClient for JsonSchemaClient {
    async fn recreate_schema(&self, tables: &TableBindings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let schema = StoredSchema {
            recreated_at: chrono::Utc::now().to_rfc3339(),
            tables: tables.clone(),
        };
        let content = serde_json::to_string_pretty(&schema)?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
