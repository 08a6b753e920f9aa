//! Module loading - produces virtual module source, recreating the local
//! store schema when a seed file is loaded

use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::codegen::{self, CodegenError};
use super::plugin::PluginSettings;
use super::recreation::RecreationLocks;
use crate::core::models::{BuildMode, LateTables, ModuleKind};
use crate::core::ports::{DatabaseClient, DatabaseClientFactory, StoreLocator};

/// Errors produced while loading a module
#[derive(Debug, Error)]
pub enum LoadError {
    /// Creating the client or recreating the schema failed
    #[error("failed to recreate tables of {}", path.display())]
    Recreation {
        /// Store path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Module source could not be generated
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Loads virtual modules for one project
#[derive(Debug)]
pub struct ModuleLoader<F> {
    settings: PluginSettings,
    tables: LateTables,
    factory: F,
    locks: RecreationLocks,
}

impl<F: DatabaseClientFactory> ModuleLoader<F> {
    /// Create a loader sharing the process-wide recreation locks
    pub fn new(settings: PluginSettings, tables: LateTables, factory: F) -> Self {
        Self::with_locks(settings, tables, factory, RecreationLocks::global())
    }

    /// Create a loader with its own lock table
    pub const fn with_locks(
        settings: PluginSettings,
        tables: LateTables,
        factory: F,
        locks: RecreationLocks,
    ) -> Self {
        Self {
            settings,
            tables,
            factory,
            locks,
        }
    }

    /// Project settings
    #[must_use]
    pub const fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// The database client factory
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Source of module `id`, or `None` when the bundler should load it itself
    ///
    /// Loading a seed file first recreates the local store schema from the
    /// current table bindings; the seed file itself is still read by the
    /// bundler.
    ///
    /// # Errors
    ///
    /// Returns an error if schema recreation fails or the source cannot be
    /// generated.
    pub async fn load(&self, id: &str) -> Result<Option<String>, LoadError> {
        let kind = self.settings.ids.kind_of_resolved(id);

        if kind == Some(ModuleKind::LocalClient) {
            let source = codegen::local_client_module(&self.settings.imports, &self.settings.db_url())?;
            return Ok(Some(source));
        }

        if self.is_seed_file(id) {
            self.recreate_tables().await?;
        }

        match kind {
            Some(ModuleKind::Seed) => self.public_module(true).map(Some),
            Some(ModuleKind::PublicApi) => self.public_module(false).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether `id` is one of the project's seed files
    #[must_use]
    pub fn is_seed_file(&self, id: &str) -> bool {
        let candidate = Path::new(id);
        self.settings.seed_files.iter().any(|file| file == candidate)
    }

    /// Drop and recreate every table of the local store
    ///
    /// Recreations of the same store are serialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created or recreation fails.
    pub async fn recreate_tables(&self) -> Result<(), LoadError> {
        let path = &self.settings.store_path;
        let lock = self.locks.lock_for(path);
        let _guard = lock.lock().await;

        let tables = self.tables.get();
        debug!("recreating {} table(s) in {}", tables.len(), path.display());

        let failed = |source: anyhow::Error| LoadError::Recreation {
            path: path.clone(),
            source: source.into(),
        };
        let client = self.factory.create_client(&StoreLocator::local(path)).map_err(failed)?;
        client.recreate_schema(&tables).await.map_err(failed)?;

        info!("recreated tables in {}", path.display());
        Ok(())
    }

    fn public_module(&self, seed: bool) -> Result<String, LoadError> {
        let settings = &self.settings;
        let tables = self.tables.get();
        let source = match &settings.mode {
            BuildMode::Managed { app_token } => codegen::managed_public_module(
                &settings.imports,
                app_token,
                &settings.remote_url,
                &tables,
            )?,
            BuildMode::Local => {
                let globs: &[String] = if seed { &settings.seed_globs } else { &[] };
                codegen::local_public_module(&settings.imports, &settings.ids.local_client, &tables, globs)?
            },
        };
        Ok(source)
    }
}
