//! Filesystem importer resolution
//!
//! Implements `ImporterResolver` by canonicalizing the importer path on disk.

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::models::VIRTUAL_PREFIX;
use crate::core::ports::ImporterResolver;

/// Resolves importers to canonical paths on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImporterResolver;

impl ImporterResolver for FsImporterResolver {
    async fn canonicalize(&self, importer: &str) -> Option<PathBuf> {
        // Virtual importers have no file behind them
        if importer.starts_with(VIRTUAL_PREFIX) {
            return None;
        }
        // Bundler ids may carry a query (`?astro&type=script`)
        let path = importer.split_once('?').map_or(importer, |(path, _)| path);

        match tokio::fs::canonicalize(Path::new(path)).await {
            Ok(canonical) => Some(canonical),
            Err(err) => {
                debug!("could not resolve importer {importer}: {err}");
                None
            },
        }
    }
}
