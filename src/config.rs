//! Project configuration
//!
//! Read from `devbar.toml` in the project root. Every field has a default, so
//! the file is optional:
//!
//! ```toml
//! [audit]
//! rules = ["audits/*.toml"]
//! disabled = ["a11y-autofocus"]
//!
//! [db]
//! src_dir = "src"
//! mode = "local"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::toml::{extend_catalog, load_tables};
use crate::core::models::{BuildMode, RuleCatalog, TableBindings, VirtualIds};
use crate::core::services::{PluginSettings, RuntimeImports, SEED_FILE_NAMES};
use crate::paths;
use crate::rules::builtin_catalog;

/// Project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevbarConfig {
    /// Audit settings
    #[serde(default)]
    pub audit: AuditConfig,
    /// Database plugin settings
    #[serde(default)]
    pub db: DbConfig,
}

/// Audit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Glob patterns of extra rule files, relative to the project root
    #[serde(default = "default_rule_globs")]
    pub rules: Vec<String>,
    /// Rule codes to skip
    #[serde(default)]
    pub disabled: Vec<String>,
}

fn default_rule_globs() -> Vec<String> {
    vec!["audits/*.toml".to_string()]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            rules: default_rule_globs(),
            disabled: Vec::new(),
        }
    }
}

/// Which database the generated modules talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbMode {
    /// Local development store
    #[default]
    Local,
    /// Hosted database
    Managed,
}

/// Database plugin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// Source directory
    #[serde(default = "default_src_dir")]
    pub src_dir: String,
    /// Directory holding seed files and table definitions
    #[serde(default = "default_db_dir")]
    pub db_dir: String,
    /// Local store path; defaults to `.astro/content.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
    /// Table definitions file
    #[serde(default = "default_tables_file")]
    pub tables_file: String,
    /// Runtime package name
    #[serde(default = "default_package")]
    pub package: String,
    /// Local or managed
    #[serde(default)]
    pub mode: DbMode,
    /// App token for managed mode (`ASTRO_STUDIO_APP_TOKEN` takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    /// Remote database URL (`ASTRO_STUDIO_REMOTE_DB_URL` takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_db_dir() -> String {
    "db".to_string()
}

fn default_tables_file() -> String {
    "db/tables.toml".to_string()
}

fn default_package() -> String {
    "@astrojs/db".to_string()
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            db_dir: default_db_dir(),
            store_path: None,
            tables_file: default_tables_file(),
            package: default_package(),
            mode: DbMode::default(),
            app_token: None,
            remote_url: None,
        }
    }
}

impl DevbarConfig {
    /// Load the configuration of the project at `root`; a missing file means defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = paths::config_file(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the configuration to the project at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, root: &Path) -> anyhow::Result<PathBuf> {
        let path = paths::config_file(root);
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Build mode, with `force_managed` overriding the configured mode
    ///
    /// # Errors
    ///
    /// Returns an error if managed mode is selected without an app token.
    pub fn build_mode(&self, force_managed: bool) -> anyhow::Result<BuildMode> {
        if !force_managed && self.db.mode == DbMode::Local {
            return Ok(BuildMode::Local);
        }
        let app_token = env::var(paths::APP_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| self.db.app_token.clone());
        match app_token {
            Some(app_token) => Ok(BuildMode::Managed { app_token }),
            None => anyhow::bail!(
                "Managed mode needs an app token. Set {} or db.app_token in {}",
                paths::APP_TOKEN_ENV,
                paths::CONFIG_FILE
            ),
        }
    }

    /// Remote database URL: environment, then configuration, then the default
    #[must_use]
    pub fn remote_url(&self) -> String {
        env::var(paths::REMOTE_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.db.remote_url.clone())
            .unwrap_or_else(|| paths::DEFAULT_REMOTE_URL.to_string())
    }

    /// Plugin settings for the project at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the build mode cannot be determined.
    pub fn plugin_settings(&self, root: &Path, force_managed: bool) -> anyhow::Result<PluginSettings> {
        let root = paths::canonical(&paths::normalize(root));
        let store_path = self
            .db
            .store_path
            .as_ref()
            .map_or_else(paths::default_store_path, PathBuf::from);
        let db_dir = paths::resolve(&root, Path::new(&self.db.db_dir));
        let glob_dir = self.db.db_dir.trim_matches('/');

        Ok(PluginSettings {
            src_dir: paths::canonical(&paths::resolve(&root, Path::new(&self.db.src_dir))),
            store_path: paths::resolve(&root, &store_path),
            seed_files: SEED_FILE_NAMES.iter().map(|name| db_dir.join(name)).collect(),
            seed_globs: SEED_FILE_NAMES.iter().map(|name| format!("/{glob_dir}/{name}")).collect(),
            ids: VirtualIds::default(),
            mode: self.build_mode(force_managed)?,
            imports: RuntimeImports::for_package(&self.db.package),
            remote_url: self.remote_url(),
            root,
        })
    }

    /// Built-in rules plus the project's rule files, minus disabled rules
    ///
    /// # Errors
    ///
    /// Returns an error if a rule file cannot be loaded.
    pub fn catalog(&self, root: &Path) -> anyhow::Result<RuleCatalog> {
        let mut catalog = builtin_catalog()?;
        let files = extend_catalog(&mut catalog, root, &self.audit.rules)?;
        if files > 0 {
            log::debug!("loaded {files} rule file(s)");
        }
        catalog.disable(&self.audit.disabled);
        Ok(catalog)
    }

    /// Table bindings of the project at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the tables file exists but is invalid.
    pub fn tables(&self, root: &Path) -> anyhow::Result<TableBindings> {
        load_tables(&paths::resolve(root, Path::new(&self.db.tables_file)))
    }
}
