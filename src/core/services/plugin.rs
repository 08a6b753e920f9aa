//! Bundler-facing plugin combining resolution and loading

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::codegen::RuntimeImports;
use super::module_loader::{LoadError, ModuleLoader};
use super::module_resolver::ModuleResolver;
use crate::core::models::{BuildMode, LateTables, Resolution, VirtualIds};
use crate::core::ports::{DatabaseClientFactory, ImporterResolver};
use crate::paths;

/// Name the plugin registers under
pub const PLUGIN_NAME: &str = "astro:db";

/// Seed file names looked up in the database directory
pub const SEED_FILE_NAMES: [&str; 4] = ["seed.ts", "seed.js", "seed.mjs", "seed.mts"];

/// Everything the plugin needs to know about a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSettings {
    /// Project root
    pub root: PathBuf,
    /// Source directory; importers under it get the seeding module
    pub src_dir: PathBuf,
    /// Local store file
    pub store_path: PathBuf,
    /// Absolute seed file paths; loading one recreates the schema
    pub seed_files: Vec<PathBuf>,
    /// Root-relative seed file patterns eagerly imported by the seed module
    pub seed_globs: Vec<String>,
    /// Identifiers answered to
    pub ids: VirtualIds,
    /// Local or managed
    pub mode: BuildMode,
    /// Runtime package specifiers
    pub imports: RuntimeImports,
    /// Remote database URL used in managed mode
    pub remote_url: String,
}

impl PluginSettings {
    /// Settings for a project using the conventional `db/` directory
    ///
    /// `root` and `src_dir` are canonicalized when they exist, so they compare
    /// equal to the canonical importer and module paths the bundler reports.
    pub fn new(
        root: impl Into<PathBuf>,
        src_dir: impl Into<PathBuf>,
        store_path: impl Into<PathBuf>,
        mode: BuildMode,
    ) -> Self {
        let root = paths::canonical(&root.into());
        let db_dir = root.join("db");
        Self {
            seed_files: SEED_FILE_NAMES.iter().map(|name| db_dir.join(name)).collect(),
            seed_globs: SEED_FILE_NAMES.iter().map(|name| format!("/db/{name}")).collect(),
            src_dir: paths::canonical(&src_dir.into()),
            store_path: store_path.into(),
            root,
            ids: VirtualIds::default(),
            mode,
            imports: RuntimeImports::default(),
            remote_url: "https://db.services.astro.build".to_string(),
        }
    }

    /// `file://` URL of the local store
    #[must_use]
    pub fn db_url(&self) -> String {
        file_url(&self.store_path)
    }
}

/// `file://` URL of an absolute path, with forward slashes
///
/// Path bytes outside the unreserved and sub-delimiter sets are
/// percent-encoded, so `#`, `?`, `%` and spaces stay part of the path.
#[must_use]
pub fn file_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let mut url = String::from(if normalized.starts_with('/') { "file://" } else { "file:///" });
    for byte in normalized.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/".contains(&byte) {
            url.push(char::from(byte));
        } else {
            let _ = write!(url, "%{byte:02X}");
        }
    }
    url
}

/// The database virtual module plugin
#[derive(Debug)]
pub struct VirtualModulePlugin<R, F> {
    resolver: ModuleResolver<R>,
    loader: ModuleLoader<F>,
}

impl<R: ImporterResolver, F: DatabaseClientFactory> VirtualModulePlugin<R, F> {
    /// Assemble a plugin
    pub fn new(settings: PluginSettings, tables: LateTables, importers: R, factory: F) -> Self {
        let resolver = ModuleResolver::new(
            settings.ids.clone(),
            settings.mode.clone(),
            settings.src_dir.clone(),
            importers,
        );
        Self {
            resolver,
            loader: ModuleLoader::new(settings, tables, factory),
        }
    }

    /// Assemble a plugin from an existing resolver and loader
    pub const fn from_parts(resolver: ModuleResolver<R>, loader: ModuleLoader<F>) -> Self {
        Self { resolver, loader }
    }

    /// Plugin name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Classification of `id` requested from `importer`
    pub async fn classify(&self, id: &str, importer: Option<&str>) -> Resolution {
        self.resolver.resolve(id, importer).await
    }

    /// Resolved id for `id`, or `None` to let other plugins handle it
    pub async fn resolve_id(&self, id: &str, importer: Option<&str>) -> Option<String> {
        let kind = self.classify(id, importer).await.kind()?;
        Some(self.resolver.ids().resolved(kind))
    }

    /// Source of module `id`, or `None` to let the bundler load it
    ///
    /// # Errors
    ///
    /// Returns an error if schema recreation fails or the source cannot be
    /// generated.
    pub async fn load(&self, id: &str) -> Result<Option<String>, LoadError> {
        self.loader.load(id).await
    }

    /// The loader
    #[must_use]
    pub const fn loader(&self) -> &ModuleLoader<F> {
        &self.loader
    }
}
