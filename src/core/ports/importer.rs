//! Importer resolution port

use std::future::Future;
use std::path::PathBuf;

/// Resolves the file importing a virtual module to its canonical path
pub trait ImporterResolver {
    /// Canonical path of `importer`, or `None` when it cannot be resolved
    ///
    /// Failing to resolve is not an error: callers fall back to the
    /// non-seeding module.
    fn canonicalize(&self, importer: &str) -> impl Future<Output = Option<PathBuf>>;
}
