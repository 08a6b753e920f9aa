//! Module resolution - maps a requested id to one of the virtual modules

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::models::{BuildMode, ModuleKind, Resolution, VirtualIds};
use crate::core::ports::ImporterResolver;

/// Classify a requested id once the importer's canonical path is known
///
/// `canonical_importer` is only consulted for the public id in local mode;
/// `None` there means the importer was absent or could not be resolved.
#[must_use]
pub fn classify(
    ids: &VirtualIds,
    id: &str,
    managed: bool,
    canonical_importer: Option<&Path>,
    src_dir: &Path,
) -> Resolution {
    if id == ids.local_client {
        return Resolution::Module(ModuleKind::LocalClient);
    }
    if id != ids.public {
        return Resolution::NotHandled;
    }
    if managed {
        return Resolution::Module(ModuleKind::PublicApi);
    }
    match canonical_importer {
        Some(importer) if importer.starts_with(src_dir) => Resolution::Module(ModuleKind::Seed),
        _ => Resolution::Module(ModuleKind::PublicApi),
    }
}

/// Resolves requested ids, canonicalizing importers through a port
#[derive(Debug)]
pub struct ModuleResolver<R> {
    ids: VirtualIds,
    mode: BuildMode,
    src_dir: PathBuf,
    importers: R,
}

impl<R: ImporterResolver> ModuleResolver<R> {
    /// Create a resolver
    pub fn new(
        ids: VirtualIds,
        mode: BuildMode,
        src_dir: impl Into<PathBuf>,
        importers: R,
    ) -> Self {
        Self {
            ids,
            mode,
            src_dir: src_dir.into(),
            importers,
        }
    }

    /// The identifiers this resolver answers to
    #[must_use]
    pub const fn ids(&self) -> &VirtualIds {
        &self.ids
    }

    /// The build mode
    #[must_use]
    pub const fn mode(&self) -> &BuildMode {
        &self.mode
    }

    /// Resolve `id` requested from `importer`
    ///
    /// The importer is only canonicalized when the answer depends on it.
    pub async fn resolve(&self, id: &str, importer: Option<&str>) -> Resolution {
        let managed = self.mode.is_managed();
        let needs_importer = id == self.ids.public && id != self.ids.local_client && !managed;

        let canonical = match importer {
            Some(importer) if needs_importer => self.importers.canonicalize(importer).await,
            _ => None,
        };

        let resolution = classify(&self.ids, id, managed, canonical.as_deref(), &self.src_dir);
        debug!("resolved {id:?} (importer {importer:?}) to {resolution:?}");
        resolution
    }
}
